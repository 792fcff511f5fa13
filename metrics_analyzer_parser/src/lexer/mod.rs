mod lex_error;
mod lexer;
mod tokens;

pub(crate) use lex_error::ScanError;
pub(crate) use tokens::Lexeme;

pub use lex_error::{LexError, LexResult};
pub use lexer::{tokenize, Lexer, Token};
pub use tokens::TokenKind;

#[cfg(test)]
mod lexer_tests;
