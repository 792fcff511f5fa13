use logos::{Logos, Span};

use crate::lexer::{LexError, LexResult, Lexeme, TokenKind};

/// A token of a query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Position of the token in its sequence, starting at 0.
    pub index: usize,

    /// The kind of token.
    pub kind: TokenKind,

    pub text: &'a str,

    /// Byte range of the token in the source expression.
    pub span: Span,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn is_name(&self) -> bool {
        self.kind == TokenKind::Name
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        self.kind == TokenKind::String
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Number
    }

    #[inline]
    pub fn is_operator(&self) -> bool {
        self.kind == TokenKind::Operator
    }

    fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == punct
    }

    pub fn is_colon(&self) -> bool {
        self.is_punct(":")
    }

    pub fn is_left_paren(&self) -> bool {
        self.is_punct("(")
    }

    pub fn is_right_paren(&self) -> bool {
        self.is_punct(")")
    }

    pub fn is_left_brace(&self) -> bool {
        self.is_punct("{")
    }

    pub fn is_right_brace(&self) -> bool {
        self.is_punct("}")
    }

    pub fn is_left_bracket(&self) -> bool {
        self.is_punct("[")
    }

    pub fn is_right_bracket(&self) -> bool {
        self.is_punct("]")
    }
}

/// A lexer of query expressions. Yields tokens with consecutive indexes and stops after the
/// first lexical error.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Lexeme>,
    source: &'a str,
    index: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: Lexeme::lexer(source),
            source,
            index: 0,
            done: false,
        }
    }

    fn read_token(&mut self) -> Option<LexResult<Token<'a>>> {
        if self.done {
            return None;
        }

        let lexeme = match self.inner.next() {
            None => {
                self.done = true;
                return None;
            }
            Some(Err(err)) => {
                self.done = true;
                let err = LexError::from_scan(err, self.source, self.inner.span().start);
                return Some(Err(err));
            }
            Some(Ok(lexeme)) => lexeme,
        };

        let token = Token {
            index: self.index,
            kind: lexeme.kind(),
            text: self.inner.slice(),
            span: self.inner.span(),
        };
        self.index += 1;
        Some(Ok(token))
    }

    pub fn is_eof(&self) -> bool {
        self.done
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token<'a>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.read_token()
    }
}

/// Tokenize a query expression into an ordered list of tokens.
///
/// Whitespace, line breaks and comments are dropped. Empty or whitespace-only input yields an
/// empty list.
pub fn tokenize(expression: &str) -> LexResult<Vec<Token<'_>>> {
    Lexer::new(expression).collect()
}
