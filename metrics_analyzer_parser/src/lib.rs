#![forbid(unsafe_code)]
extern crate ahash;
extern crate logos;
extern crate phf;
extern crate rayon;
extern crate thiserror;

pub mod extractor;
pub mod lexer;

pub use extractor::{extract, extract_batch, extract_metric_names, MetricNames};
pub use lexer::{tokenize, LexError, LexResult, Token, TokenKind};

pub mod prelude {
    pub use crate::extractor::*;
    pub use crate::lexer::*;
}
