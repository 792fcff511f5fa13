use logos::{Lexer, Logos};
use strum_macros::{Display, EnumIter};

use crate::lexer::ScanError;

fn unterminated_string(_: &mut Lexer<Lexeme>) -> Result<(), ScanError> {
    Err(ScanError::UnterminatedString)
}

/// Raw lexemes of the query language. Whitespace, line breaks and `#` comments are skipped
/// and never surface as lexemes.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(error = ScanError)]
#[logos(subpattern decimal = r"[0-9]+")]
#[logos(subpattern exponent = r"[eE][+-]?[0-9]+")]
#[logos(subpattern duration = r"[0-9]+(?:\.[0-9]+)?(?:ms|[smhdwy])")]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\r\n]*")] // single line comment
pub(crate) enum Lexeme {
    #[regex(r"[_a-zA-Z][_a-zA-Z0-9]*")]
    Identifier,

    #[regex(r"(?&decimal)(?:\.[0-9]*)?(?&exponent)?")]
    #[regex(r"\.(?&decimal)(?&exponent)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    #[regex(r"(?&duration)+")]
    Number,

    #[regex(r#""(?s:[^"\\]|\\.)*""#)]
    #[regex(r#"'(?s:[^'\\]|\\.)*'"#)]
    #[regex(r"`[^`]*`")]
    StringLiteral,

    #[regex(r#""(?s:[^"\\]|\\.)*"#, unterminated_string)]
    #[regex(r#"'(?s:[^'\\]|\\.)*"#, unterminated_string)]
    #[regex(r"`[^`]*", unterminated_string)]
    ErrorStringUnterminated,

    /// Grafana template variable, e.g. `$job`, `$__rate_interval` or `${instance:regex}`.
    #[regex(r"\$[_a-zA-Z0-9]+")]
    #[regex(r"\$\{[^}]*\}")]
    Variable,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(";")]
    SemiColon,

    #[token("@")]
    At,

    #[token("=")]
    Equal,

    #[token("=~")]
    RegexEqual,

    #[token("!~")]
    RegexNotEqual,

    #[token("+")]
    OpPlus,

    #[token("-")]
    OpMinus,

    #[token("*")]
    OpMul,

    #[token("/")]
    OpDiv,

    #[token("%")]
    OpMod,

    #[token("^")]
    OpPow,

    #[token("==")]
    OpEqual,

    #[token("!=")]
    OpNotEqual,

    #[token(">")]
    OpGreaterThan,

    #[token("<")]
    OpLessThan,

    #[token(">=")]
    OpGreaterThanOrEqual,

    #[token("<=")]
    OpLessThanOrEqual,
}

impl Lexeme {
    pub fn is_operator(&self) -> bool {
        use Lexeme::*;

        matches!(
            self,
            OpPlus
                | OpMinus
                | OpMul
                | OpDiv
                | OpMod
                | OpPow
                | OpEqual
                | OpNotEqual
                | OpGreaterThan
                | OpLessThan
                | OpGreaterThanOrEqual
                | OpLessThanOrEqual
        )
    }

    #[inline]
    pub fn is_punctuation(&self) -> bool {
        use Lexeme::*;
        matches!(
            self,
            LeftParen | RightParen | LeftBrace | RightBrace | LeftBracket | RightBracket | Colon
        )
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Lexeme::Identifier => TokenKind::Name,
            Lexeme::StringLiteral => TokenKind::String,
            Lexeme::Number => TokenKind::Number,
            op if op.is_operator() => TokenKind::Operator,
            p if p.is_punctuation() => TokenKind::Punctuation,
            _ => TokenKind::Other,
        }
    }
}

/// Coarse classification of a token, as seen by the metric extractor.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum TokenKind {
    /// Identifier-like: letters, digits and underscore, not starting with a digit.
    Name,
    /// Quoted string literal.
    String,
    /// Numeric or duration literal.
    Number,
    /// One of `+ - * / % ^ == != > < >= <=`.
    Operator,
    /// One of `( ) { } [ ] :`.
    Punctuation,
    /// Anything else the lexer accepts, e.g. `,` or `=~`.
    Other,
}
