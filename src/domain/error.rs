//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Malformed serialized input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: malformed integer token '{token}'")]
    InvalidToken { line: usize, token: String },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("line {line}: negative value {value} is not allowed in a tree")]
    NegativeTreeValue { line: usize, value: i64 },
}

/// A back-reference that cannot be resolved against the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackReferenceError {
    #[error("back-reference to catalog position {position}, but only {cataloged} subtrees are cataloged")]
    OutOfRange { position: usize, cataloged: usize },

    #[error("back-reference value {value} does not map to a catalog position")]
    Underflow { value: i64 },

    #[error("back-reference to catalog position {position}, which is an unfinished ancestor")]
    Unfinished { position: usize },
}

/// Domain errors abort a single compress or decompress call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid back-reference: {0}")]
    BackReference(#[from] BackReferenceError),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
