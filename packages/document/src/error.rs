use thiserror::Error;

/// A dotted path that cannot be written.
///
/// Every variant is recoverable: callers treat it as a no-op or surface it
/// as a field-level message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Path is empty")]
    Empty,

    #[error("Path contains an empty segment: {0:?}")]
    EmptySegment(String),

    #[error("Index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot descend into scalar value at segment {segment:?}")]
    NotAContainer { segment: String },

    #[error("Sequence addressed with non-integer segment {segment:?}")]
    KeyOnSequence { segment: String },

    #[error("Field is immutable: {field}")]
    ImmutableField { field: String },

    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Field {field} expects {expected}")]
    TypeMismatch { field: String, expected: &'static str },
}
