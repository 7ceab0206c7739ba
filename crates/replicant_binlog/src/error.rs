//! Error types for binary log decoding.

use crate::kind::EventKind;
use replicant_codec::CodecError;
use replicant_source::SourceError;
use std::io;
use thiserror::Error;

/// Result type for binary log operations.
pub type BinlogResult<T> = Result<T, BinlogError>;

/// Errors that can occur while opening or decoding a log.
#[derive(Debug, Error)]
pub enum BinlogError {
    /// Byte source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error from a line-oriented input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The locator names a scheme no reader is registered for.
    #[error("'{scheme}' is not a recognized scheme")]
    UnrecognizedScheme {
        /// The scheme part of the locator.
        scheme: String,
    },

    /// The stream does not start with the binary log signature.
    #[error("incorrect magic bytes for binary log: {found:02x?}")]
    BadMagic {
        /// The bytes found where the magic was expected.
        found: Vec<u8>,
    },

    /// A record header declares a size smaller than the header itself.
    #[error("invalid record size {size} at offset {offset}")]
    InvalidRecordSize {
        /// Start offset of the record.
        offset: u64,
        /// The declared size.
        size: u32,
    },

    /// A record header declares a size above the configured limit.
    #[error("event at offset {offset} is {size} bytes, limit is {max}")]
    EventTooLarge {
        /// Start offset of the record.
        offset: u64,
        /// The declared size.
        size: u32,
        /// The configured maximum.
        max: u32,
    },

    /// The stream ended inside a record body.
    #[error("truncated record at offset {offset}: expected {expected} body bytes, got {actual}")]
    TruncatedRecord {
        /// Start offset of the record.
        offset: u64,
        /// Body bytes the header announced.
        expected: usize,
        /// Body bytes actually available.
        actual: usize,
    },

    /// A record's end offset disagrees with where it was found.
    #[error("record at offset {offset} claims to start at {claimed} (end_log_pos {end_offset}, size {size})")]
    PositionMismatch {
        /// Actual stream offset of the record.
        offset: u64,
        /// `end_offset - size` from the header.
        claimed: u64,
        /// End offset from the header.
        end_offset: u32,
        /// Size from the header.
        size: u32,
    },

    /// A query event carries a status variable code outside the known set.
    #[error("unknown status variable code {code} in query event at offset {offset}")]
    BadStatusVariable {
        /// Start offset of the record.
        offset: u64,
        /// The offending code.
        code: u8,
    },

    /// A query event carries a known but unsupported status variable.
    #[error("unsupported status variable code {code} in query event at offset {offset}")]
    UnsupportedStatusVariable {
        /// Start offset of the record.
        offset: u64,
        /// The offending code.
        code: u8,
    },

    /// An event body does not match its layout.
    #[error("malformed {kind} event at offset {offset}: {source}")]
    MalformedEvent {
        /// Start offset of the record.
        offset: u64,
        /// Kind of the event being decoded.
        kind: EventKind,
        /// The underlying field error.
        source: CodecError,
    },

    /// A line of a textual log does not match the expected grammar.
    #[error("unrecognized format at line {line_number}: {line}")]
    UnrecognizedFormat {
        /// One-based line number.
        line_number: usize,
        /// The offending raw line.
        line: String,
    },

    /// A textual log ended in the middle of an event.
    #[error("unexpected end of text log while reading {context}")]
    UnexpectedEndOfText {
        /// What the reader was looking for.
        context: String,
    },
}

impl BinlogError {
    /// Creates an unrecognized format error.
    pub fn unrecognized_format(line_number: usize, line: impl Into<String>) -> Self {
        Self::UnrecognizedFormat {
            line_number,
            line: line.into(),
        }
    }

    /// Creates an unexpected end of text error.
    pub fn unexpected_end(context: impl Into<String>) -> Self {
        Self::UnexpectedEndOfText {
            context: context.into(),
        }
    }
}
