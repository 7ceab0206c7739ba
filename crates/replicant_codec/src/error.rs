//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Fewer bytes remain in the buffer than a read requested.
    #[error("truncated buffer: requested {requested} bytes at offset {offset}, {available} available")]
    Truncated {
        /// Cursor position at the time of the read.
        offset: usize,
        /// Number of bytes the read needed.
        requested: usize,
        /// Number of bytes left in the buffer.
        available: usize,
    },

    /// A field held a value outside its allowed domain.
    #[error("invalid field at offset {offset}: {message}")]
    InvalidField {
        /// Cursor position of the offending field.
        offset: usize,
        /// Description of the problem.
        message: String,
    },
}

impl CodecError {
    /// Create an invalid field error.
    pub fn invalid_field(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidField {
            offset,
            message: message.into(),
        }
    }
}
