use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};
use anyhow::{ensure, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::iter::Fuse;
use tracing::{debug, trace};

#[derive(PartialOrd, PartialEq, Clone, Copy, Debug)]
pub(crate) enum Precedence {
    LOWEST,
    EQUALS,      // ==
    LESSGREATER, // > or <
    SUM,         // +
    PRODUCT,     // *
    PREFIX,      // -x or !x
    CALL,        // f(x)
}

static PRECEDENCES: Lazy<HashMap<TokenKind, Precedence>> = Lazy::new(|| {
    use Precedence::*;
    use TokenKind::*;
    let mut table = HashMap::new();
    table.insert(EQ, EQUALS);
    table.insert(NEQ, EQUALS);
    table.insert(LT, LESSGREATER);
    table.insert(GT, LESSGREATER);
    table.insert(PLUS, SUM);
    table.insert(MINUS, SUM);
    table.insert(ASTERISK, PRODUCT);
    table.insert(SLASH, PRODUCT);
    table.insert(LPAREN, CALL);
    table
});

impl TokenKind {
    fn precedence(self) -> Precedence {
        PRECEDENCES
            .get(&self)
            .copied()
            .unwrap_or(Precedence::LOWEST)
    }
}

// Nested prefix operators and groups recurse once per token.
const RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

type PrefixParseFn<I> = fn(&mut Parser<I>) -> Option<Expression>;
type InfixParseFn<I> = fn(&mut Parser<I>, Option<Expression>) -> Option<Expression>;

pub struct Parser<I> {
    tokens: Fuse<I>,
    cur: Token,
    peek: Token,
    errors: Vec<String>,
    prefix_parse_fns: HashMap<TokenKind, PrefixParseFn<I>>,
    infix_parse_fns: HashMap<TokenKind, InfixParseFn<I>>,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        use TokenKind::*;
        let mut parser = Parser {
            tokens: tokens.fuse(),
            cur: Token::eof(),
            peek: Token::eof(),
            errors: Vec::new(),
            prefix_parse_fns: HashMap::new(),
            infix_parse_fns: HashMap::new(),
        };
        parser.register_prefix(IDENT, Self::parse_identifier);
        parser.register_prefix(INT, Self::parse_integer_literal);
        parser.register_prefix(TRUE, Self::parse_boolean);
        parser.register_prefix(FALSE, Self::parse_boolean);
        parser.register_prefix(BANG, Self::parse_prefix_expression);
        parser.register_prefix(MINUS, Self::parse_prefix_expression);
        parser.register_prefix(LPAREN, Self::parse_grouped_expression);
        parser.register_prefix(IF, Self::parse_if_expression);
        parser.register_prefix(FUNCTION, Self::parse_function_literal);
        for &kind in &[PLUS, MINUS, ASTERISK, SLASH, EQ, NEQ, LT, GT] {
            parser.register_infix(kind, Self::parse_infix_expression);
        }
        parser.register_infix(LPAREN, Self::parse_call_expression);

        parser.next_token();
        parser.next_token();
        parser
    }
    fn register_prefix(&mut self, kind: TokenKind, f: PrefixParseFn<I>) {
        self.prefix_parse_fns.insert(kind, f);
    }
    fn register_infix(&mut self, kind: TokenKind, f: InfixParseFn<I>) {
        self.infix_parse_fns.insert(kind, f);
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
    fn record(&mut self, err: ParseError) {
        debug!(error = %err, literal = %self.cur.literal, "syntax error");
        self.errors.push(err.to_string());
    }
    fn peek_error(&mut self, expected: TokenKind) {
        self.record(ParseError::UnexpectedToken {
            expected,
            got: self.peek.kind,
        });
    }

    fn next_token(&mut self) {
        let next = self.tokens.next().unwrap_or_else(Token::eof);
        self.cur = std::mem::replace(&mut self.peek, next);
    }
    fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur.is(kind)
    }
    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }
    fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_token_is(kind) {
            self.next_token();
            Some(())
        } else {
            self.peek_error(kind);
            None
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while !self.cur_token_is(TokenKind::EOF) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.next_token();
        }
        program
    }
    pub fn parse(&mut self) -> Result<Program> {
        let program = self.parse_program();
        ensure!(
            self.errors.is_empty(),
            "parser has {} errors:\n{}",
            self.errors.len(),
            self.errors.join("\n")
        );
        Ok(program)
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        trace!(kind = %self.cur.kind, literal = %self.cur.literal, "statement");
        match self.cur.kind {
            TokenKind::LET => self.parse_let_statement(),
            TokenKind::RETURN => Some(self.parse_return_statement()),
            _ => Some(self.parse_expression_statement()),
        }
    }
    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::IDENT)?;
        let name = Identifier::new(self.cur.clone());
        self.expect_peek(TokenKind::ASSIGN)?;
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST);
        if self.peek_token_is(TokenKind::SEMICOLON) {
            self.next_token();
        }
        Some(Statement::LetStatement { token, name, value })
    }
    fn parse_return_statement(&mut self) -> Statement {
        let token = self.cur.clone();
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST);
        if self.peek_token_is(TokenKind::SEMICOLON) {
            self.next_token();
        }
        Statement::ReturnStatement { token, value }
    }
    fn parse_expression_statement(&mut self) -> Statement {
        let token = self.cur.clone();
        let expression = self.parse_expression(Precedence::LOWEST);
        if self.peek_token_is(TokenKind::SEMICOLON) {
            self.next_token();
        }
        Statement::ExpressionStatement { token, expression }
    }
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.cur.clone(); // {
        let mut statements = Vec::new();
        self.next_token();
        while !self.cur_token_is(TokenKind::RBRACE) && !self.cur_token_is(TokenKind::EOF) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }
        BlockStatement { token, statements }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || self.parse_expression_at(precedence))
    }
    fn parse_expression_at(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match self.prefix_parse_fns.get(&self.cur.kind) {
            Some(&f) => f,
            None => {
                self.record(ParseError::NoPrefixParseFn(self.cur.kind));
                return None;
            }
        };
        let mut left = prefix(self);
        while !self.peek_token_is(TokenKind::SEMICOLON) && precedence < self.peek.kind.precedence()
        {
            let infix = match self.infix_parse_fns.get(&self.peek.kind) {
                Some(&f) => f,
                None => return left,
            };
            self.next_token();
            left = infix(self, left);
        }
        left
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier::new(self.cur.clone())))
    }
    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.cur.literal.parse::<i64>() {
            // "007" or "+5" would parse but not print back as written.
            Ok(value) if value.to_string() == self.cur.literal => {
                Some(Expression::IntegerLiteral {
                    token: self.cur.clone(),
                    value,
                })
            }
            _ => {
                self.record(ParseError::InvalidInteger(self.cur.literal.clone()));
                None
            }
        }
    }
    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean {
            token: self.cur.clone(),
            value: self.cur_token_is(TokenKind::TRUE),
        })
    }
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = PrefixOperator::from_token(token.kind)?;
        self.next_token();
        let right = self.parse_expression(Precedence::PREFIX).map(Box::new);
        Some(Expression::PrefixExpression {
            token,
            operator,
            right,
        })
    }
    fn parse_infix_expression(&mut self, left: Option<Expression>) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = InfixOperator::from_token(token.kind)?;
        // Same precedence on the right keeps equal operators left-associative.
        let precedence = token.kind.precedence();
        self.next_token();
        let right = self.parse_expression(precedence).map(Box::new);
        Some(Expression::InfixExpression {
            token,
            left: left.map(Box::new),
            operator,
            right,
        })
    }
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token(); // (
        let exp = self.parse_expression(Precedence::LOWEST);
        self.expect_peek(TokenKind::RPAREN)?;
        exp
    }
    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::LPAREN)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::LOWEST);
        self.expect_peek(TokenKind::RPAREN)?;
        self.expect_peek(TokenKind::LBRACE)?;
        let consequence = self.parse_block_statement();
        let alternative = if self.peek_token_is(TokenKind::ELSE) {
            self.next_token();
            self.expect_peek(TokenKind::LBRACE)?;
            Some(self.parse_block_statement())
        } else {
            None
        };
        Some(Expression::IfExpression {
            token,
            condition: Box::new(condition?),
            consequence,
            alternative,
        })
    }
    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::LPAREN)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::LBRACE)?;
        let body = self.parse_block_statement();
        Some(Expression::FunctionLiteral {
            token,
            parameters,
            body,
        })
    }
    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut identifiers = Vec::new();
        if self.peek_token_is(TokenKind::RPAREN) {
            self.next_token();
            return Some(identifiers);
        }
        self.next_token();
        identifiers.push(Identifier::new(self.cur.clone()));
        while self.peek_token_is(TokenKind::COMMA) {
            self.next_token();
            self.next_token();
            identifiers.push(Identifier::new(self.cur.clone()));
        }
        self.expect_peek(TokenKind::RPAREN)?;
        Some(identifiers)
    }
    fn parse_call_expression(&mut self, function: Option<Expression>) -> Option<Expression> {
        let token = self.cur.clone();
        let arguments = self.parse_call_arguments();
        Some(Expression::CallExpression {
            token,
            function: Box::new(function?),
            arguments: arguments?,
        })
    }
    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut args = Vec::new();
        if self.peek_token_is(TokenKind::RPAREN) {
            self.next_token();
            return Some(args);
        }
        self.next_token();
        args.extend(self.parse_expression(Precedence::LOWEST));
        while self.peek_token_is(TokenKind::COMMA) {
            self.next_token();
            self.next_token();
            args.extend(self.parse_expression(Precedence::LOWEST));
        }
        self.expect_peek(TokenKind::RPAREN)?;
        Some(args)
    }
}
