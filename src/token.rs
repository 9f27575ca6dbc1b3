use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TokenKind {
    ILLEGAL,
    EOF,

    IDENT, // foobar, x, y, ...
    INT,

    ASSIGN,   // =
    PLUS,     // +
    MINUS,    // -
    BANG,     // !
    ASTERISK, // *
    SLASH,    // /

    LT, // <
    GT, // >

    EQ,  // ==
    NEQ, // !=

    COMMA,     // ,
    SEMICOLON, // ;

    LPAREN, // (
    RPAREN, // )
    LBRACE, // {
    RBRACE, // }

    FUNCTION,
    LET,
    TRUE,
    FALSE,
    IF,
    ELSE,
    RETURN,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;
        let s = match self {
            ILLEGAL => "ILLEGAL",
            EOF => "EOF",
            IDENT => "IDENT",
            INT => "INT",
            ASSIGN => "=",
            PLUS => "+",
            MINUS => "-",
            BANG => "!",
            ASTERISK => "*",
            SLASH => "/",
            LT => "<",
            GT => ">",
            EQ => "==",
            NEQ => "!=",
            COMMA => ",",
            SEMICOLON => ";",
            LPAREN => "(",
            RPAREN => ")",
            LBRACE => "{",
            RBRACE => "}",
            FUNCTION => "fn",
            LET => "let",
            TRUE => "true",
            FALSE => "false",
            IF => "if",
            ELSE => "else",
            RETURN => "return",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }
    pub fn eof() -> Self {
        Self::new(TokenKind::EOF, "")
    }
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

pub fn lookup_identifier(ident: &str) -> TokenKind {
    use TokenKind::*;
    match ident {
        "fn" => FUNCTION,
        "let" => LET,
        "true" => TRUE,
        "false" => FALSE,
        "if" => IF,
        "else" => ELSE,
        "return" => RETURN,
        _ => IDENT,
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind::*;
    use crate::token::{lookup_identifier, Token};

    #[test]
    fn test_lookup_identifier() {
        let tests = vec![
            ("fn", FUNCTION),
            ("let", LET),
            ("true", TRUE),
            ("false", FALSE),
            ("if", IF),
            ("else", ELSE),
            ("return", RETURN),
            ("foobar", IDENT),
            ("letter", IDENT),
        ];
        for (input, expected) in tests {
            assert_eq!(expected, lookup_identifier(input), "{}", input);
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!("IDENT", IDENT.to_string());
        assert_eq!("!=", NEQ.to_string());
        assert_eq!("let", LET.to_string());
        assert_eq!(Token::eof(), Token::new(EOF, ""));
    }
}
