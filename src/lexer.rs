use crate::token::{lookup_identifier, Token, TokenKind};
use std::str::Chars;

pub struct Lexer<'a> {
    input: Chars<'a>,
    cur: Option<char>,
    peek: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input: input.chars(),
            cur: None,
            peek: None,
        };
        lexer.read_char();
        lexer.read_char();
        lexer
    }
    fn read_char(&mut self) {
        self.cur = self.peek;
        self.peek = self.input.next();
    }
    fn skip_whitespace(&mut self) {
        while self.cur.map_or(false, |c| c.is_ascii_whitespace()) {
            self.read_char();
        }
    }
    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut res = String::new();
        while let Some(c) = self.cur.filter(|&c| pred(c)) {
            res.push(c);
            self.read_char();
        }
        res
    }
    // `first` is consumed; a following `=` turns it into `two`.
    fn either(&mut self, first: char, one: TokenKind, two: TokenKind) -> Token {
        self.read_char();
        if self.cur == Some('=') {
            self.read_char();
            Token::new(two, format!("{}=", first))
        } else {
            Token::new(one, first.to_string())
        }
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        use TokenKind::*;
        self.skip_whitespace();
        let c = self.cur?;
        let single = |kind: TokenKind| Some(Token::new(kind, c.to_string()));
        let token = match c {
            '=' => return Some(self.either(c, ASSIGN, EQ)),
            '!' => return Some(self.either(c, BANG, NEQ)),
            c if is_letter(c) => {
                let ident = self.read_while(|c| is_letter(c) || c.is_ascii_digit());
                return Some(Token::new(lookup_identifier(&ident), ident));
            }
            c if c.is_ascii_digit() => {
                return Some(Token::new(INT, self.read_while(|c| c.is_ascii_digit())));
            }
            '+' => single(PLUS),
            '-' => single(MINUS),
            '*' => single(ASTERISK),
            '/' => single(SLASH),
            '<' => single(LT),
            '>' => single(GT),
            ',' => single(COMMA),
            ';' => single(SEMICOLON),
            '(' => single(LPAREN),
            ')' => single(RPAREN),
            '{' => single(LBRACE),
            '}' => single(RBRACE),
            _ => single(ILLEGAL),
        };
        self.read_char();
        token
    }
}
