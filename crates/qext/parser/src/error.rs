use thiserror::Error;

/// What went wrong while parsing a clause suffix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },

    #[error("integer literal out of range: {0}")]
    IntegerOutOfRange(String),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("{clause} clause is out of canonical order")]
    OutOfOrder { clause: String },

    #[error("unexpected trailing input {0}")]
    TrailingInput(String),

    #[error("input is {len} bytes, limit is {max}")]
    InputTooLong { len: usize, max: usize },
}

/// A structural error with the byte offset where parsing stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn expected(expected: impl Into<String>, found: impl Into<String>, position: usize) -> Self {
        Self::new(
            ParseErrorKind::Expected {
                expected: expected.into(),
                found: found.into(),
            },
            position,
        )
    }

    /// Human-readable message without the position.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Was the input merely cut short (more text would have helped)?
    pub fn is_unexpected_eof(&self) -> bool {
        match &self.kind {
            ParseErrorKind::Expected { found, .. } => found == "end of input",
            ParseErrorKind::UnterminatedString => true,
            _ => false,
        }
    }
}
