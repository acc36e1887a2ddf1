//! Errors reported by fallible field-element constructors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("hex input has {len} digits, at most 64 are allowed")]
    HexTooLong { len: usize },

    #[error("invalid hex digit {ch:?} at position {index}")]
    InvalidHexDigit { index: usize, ch: char },

    #[error("{len} bytes do not fit in a field element (at most 32)")]
    TooManyBytes { len: usize },

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}
