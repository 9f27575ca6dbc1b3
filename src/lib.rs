//! Syntactic analysis for the Monkey language: a lexer, a Pratt parser and
//! the syntax tree it builds.
//!
//! ```
//! use monkey_parser::{Lexer, Parser};
//!
//! let mut parser = Parser::new(Lexer::new("-a * b"));
//! let program = parser.parse_program();
//! assert!(parser.errors().is_empty());
//! assert_eq!(program.to_string(), "((-a) * b)");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::Program;
pub use error::ParseError;
pub use lexer::Lexer;
pub use parser::Parser;
