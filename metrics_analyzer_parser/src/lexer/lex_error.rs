use thiserror::Error;

pub type LexResult<T> = Result<T, LexError>;

/// Error produced when an expression is not lexically valid. Positions are byte offsets
/// into the expression.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum LexError {
    #[error("unterminated string literal at position {position}")]
    UnterminatedString { position: usize },
    #[error("invalid character `{ch}` at position {position}")]
    InvalidCharacter { ch: char, position: usize },
}

impl LexError {
    pub(crate) fn from_scan(err: ScanError, source: &str, position: usize) -> Self {
        match err {
            ScanError::UnterminatedString => LexError::UnterminatedString { position },
            ScanError::InvalidCharacter => {
                let ch = source
                    .get(position..)
                    .and_then(|s| s.chars().next())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                LexError::InvalidCharacter { ch, position }
            }
        }
    }

    /// Byte offset of the offending input.
    pub fn position(&self) -> usize {
        match self {
            LexError::UnterminatedString { position } => *position,
            LexError::InvalidCharacter { position, .. } => *position,
        }
    }
}

/// Positionless error raised from inside the logos state machine. The lexer attaches the
/// span before handing it out as a [`LexError`].
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub(crate) enum ScanError {
    #[default]
    InvalidCharacter,
    UnterminatedString,
}
