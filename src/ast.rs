use crate::token::{Token, TokenKind};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub(crate) statements: Vec<Statement>,
}

impl Program {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", |stmt| stmt.token_literal())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub(crate) token: Token,
    pub(crate) value: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let value = token.literal.clone();
        Self { token, value }
    }
    pub fn token(&self) -> &Token {
        &self.token
    }
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub(crate) token: Token, // {
    pub(crate) statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn token(&self) -> &Token {
        &self.token
    }
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    LetStatement {
        token: Token,
        name: Identifier,
        value: Option<Expression>,
    },
    ReturnStatement {
        token: Token,
        value: Option<Expression>,
    },
    ExpressionStatement {
        token: Token,
        expression: Option<Expression>,
    },
}

impl Statement {
    pub fn token_literal(&self) -> &str {
        use Statement::*;
        match self {
            LetStatement { token, .. }
            | ReturnStatement { token, .. }
            | ExpressionStatement { token, .. } => &token.literal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    Boolean {
        token: Token,
        value: bool,
    },
    PrefixExpression {
        token: Token,
        operator: PrefixOperator,
        right: Option<Box<Expression>>,
    },
    InfixExpression {
        token: Token,
        left: Option<Box<Expression>>,
        operator: InfixOperator,
        right: Option<Box<Expression>>,
    },
    IfExpression {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    CallExpression {
        token: Token, // (
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn token_literal(&self) -> &str {
        use Expression::*;
        match self {
            Identifier(ident) => &ident.token.literal,
            IntegerLiteral { token, .. }
            | Boolean { token, .. }
            | PrefixExpression { token, .. }
            | InfixExpression { token, .. }
            | IfExpression { token, .. }
            | FunctionLiteral { token, .. }
            | CallExpression { token, .. } => &token.literal,
        }
    }
}

impl Statement {
    fn into_expressions(self, out: &mut Vec<Expression>) {
        use Statement::*;
        match self {
            LetStatement { value, .. } | ReturnStatement { value, .. } => out.extend(value),
            ExpressionStatement { expression, .. } => out.extend(expression),
        }
    }
}

impl Expression {
    // Moves every child expression into `out`, leaving `self` shallow.
    fn detach_children(&mut self, out: &mut Vec<Expression>) {
        use std::mem::{replace, take};
        use Expression::*;
        fn detach_block(block: &mut BlockStatement, out: &mut Vec<Expression>) {
            for stmt in take(&mut block.statements) {
                stmt.into_expressions(out);
            }
        }
        let placeholder = || Boolean {
            token: Token::eof(),
            value: false,
        };
        match self {
            Identifier(_) | IntegerLiteral { .. } | Boolean { .. } => {}
            PrefixExpression { right, .. } => out.extend(take(right).map(|e| *e)),
            InfixExpression { left, right, .. } => {
                out.extend(take(left).map(|e| *e));
                out.extend(take(right).map(|e| *e));
            }
            IfExpression {
                condition,
                consequence,
                alternative,
                ..
            } => {
                out.push(replace(&mut **condition, placeholder()));
                detach_block(consequence, out);
                if let Some(alt) = alternative {
                    detach_block(alt, out);
                }
            }
            FunctionLiteral { body, .. } => detach_block(body, out),
            CallExpression {
                function,
                arguments,
                ..
            } => {
                out.push(replace(&mut **function, placeholder()));
                out.append(arguments);
            }
        }
    }
}

// Nesting depth is unbounded (`!!!!...1`), so no recursion here.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut exp) = pending.pop() {
            exp.detach_children(&mut pending);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    PLUS,
    MINUS,
    ASTERISK,
    SLASH,
    LT,
    GT,
    EQ,
    NEQ,
}

impl InfixOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use InfixOperator::*;
        let op = match kind {
            TokenKind::PLUS => PLUS,
            TokenKind::MINUS => MINUS,
            TokenKind::ASTERISK => ASTERISK,
            TokenKind::SLASH => SLASH,
            TokenKind::LT => LT,
            TokenKind::GT => GT,
            TokenKind::EQ => EQ,
            TokenKind::NEQ => NEQ,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    MINUS,
    BANG,
}

impl PrefixOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::MINUS => Some(PrefixOperator::MINUS),
            TokenKind::BANG => Some(PrefixOperator::BANG),
            _ => None,
        }
    }
}

// Canonical, fully parenthesised rendering.

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

// An absent child renders as nothing.
struct Maybe<'a, T>(&'a Option<T>);

impl<T: Display> Display for Maybe<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(node) => write!(f, "{}", node),
            None => Ok(()),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            LetStatement { token, name, value } => {
                write!(f, "{} {} = {};", token.literal, name, Maybe(value))
            }
            ReturnStatement { token, value } => {
                write!(f, "{} {};", token.literal, Maybe(value))
            }
            ExpressionStatement { expression, .. } => {
                write!(f, "{}", Maybe(expression))
            }
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(ident) => {
                write!(f, "{}", ident)
            }
            IntegerLiteral { token, .. } | Boolean { token, .. } => {
                write!(f, "{}", token.literal)
            }
            PrefixExpression {
                operator, right, ..
            } => {
                write!(f, "({}{})", operator, Maybe(right))
            }
            InfixExpression {
                left,
                operator,
                right,
                ..
            } => {
                write!(f, "({} {} {})", Maybe(left), operator, Maybe(right))
            }
            IfExpression {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, "else {}", alt)?;
                }
                Ok(())
            }
            FunctionLiteral {
                token,
                parameters,
                body,
            } => {
                let params: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "{}({}) {}", token.literal, params.join(", "), body)
            }
            CallExpression {
                function,
                arguments,
                ..
            } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, args.join(", "))
            }
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use PrefixOperator::*;
        match self {
            MINUS => {
                write!(f, "-")
            }
            BANG => {
                write!(f, "!")
            }
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use InfixOperator::*;
        match self {
            PLUS => {
                write!(f, "+")
            }
            MINUS => {
                write!(f, "-")
            }
            ASTERISK => {
                write!(f, "*")
            }
            SLASH => {
                write!(f, "/")
            }
            LT => {
                write!(f, "<")
            }
            GT => {
                write!(f, ">")
            }
            EQ => {
                write!(f, "==")
            }
            NEQ => {
                write!(f, "!=")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement};
    use crate::token::{Token, TokenKind};

    fn ident(name: &str) -> Identifier {
        Identifier::new(Token::new(TokenKind::IDENT, name))
    }

    #[test]
    fn test_let_statement_string() {
        let program = Program {
            statements: vec![Statement::LetStatement {
                token: Token::new(TokenKind::LET, "let"),
                name: ident("myVar"),
                value: Some(Expression::Identifier(ident("anotherVar"))),
            }],
        };
        assert_eq!("let myVar = anotherVar;", program.to_string());
        assert_eq!("let", program.token_literal());
        match &program.statements()[0] {
            Statement::LetStatement { name, .. } => {
                assert_eq!(name.value(), "myVar");
                assert_eq!(name.token().literal, "myVar");
            }
            stmt => panic!("not a let statement: {:?}", stmt),
        }
    }

    #[test]
    fn test_drop_long_operand_chain() {
        let one = || Expression::IntegerLiteral {
            token: Token::new(TokenKind::INT, "1"),
            value: 1,
        };
        let mut exp = one();
        for _ in 0..200_000 {
            exp = Expression::InfixExpression {
                token: Token::new(TokenKind::PLUS, "+"),
                left: Some(Box::new(exp)),
                operator: InfixOperator::PLUS,
                right: Some(Box::new(one())),
            };
        }
        drop(exp);
    }

    #[test]
    fn test_absent_children_render_empty() {
        let program = Program {
            statements: vec![
                Statement::ReturnStatement {
                    token: Token::new(TokenKind::RETURN, "return"),
                    value: None,
                },
                Statement::ExpressionStatement {
                    token: Token::new(TokenKind::MINUS, "-"),
                    expression: Some(Expression::PrefixExpression {
                        token: Token::new(TokenKind::MINUS, "-"),
                        operator: PrefixOperator::MINUS,
                        right: None,
                    }),
                },
            ],
        };
        assert_eq!("return ;(-)", program.to_string());
    }

    #[test]
    fn test_infix_string_and_literal() {
        let exp = Expression::InfixExpression {
            token: Token::new(TokenKind::ASTERISK, "*"),
            left: Some(Box::new(Expression::IntegerLiteral {
                token: Token::new(TokenKind::INT, "2"),
                value: 2,
            })),
            operator: InfixOperator::ASTERISK,
            right: Some(Box::new(Expression::Boolean {
                token: Token::new(TokenKind::TRUE, "true"),
                value: true,
            })),
        };
        assert_eq!("(2 * true)", exp.to_string());
        assert_eq!("*", exp.token_literal());
    }

    #[test]
    fn test_operator_from_token() {
        assert_eq!(Some(InfixOperator::NEQ), InfixOperator::from_token(TokenKind::NEQ));
        assert_eq!(None, InfixOperator::from_token(TokenKind::BANG));
        assert_eq!(Some(PrefixOperator::BANG), PrefixOperator::from_token(TokenKind::BANG));
        assert_eq!(None, PrefixOperator::from_token(TokenKind::PLUS));
        assert_eq!(Program::default().token_literal(), "");
    }
}
