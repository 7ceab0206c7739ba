//! Error types for GTID and position parsing.

use thiserror::Error;

/// Result type for GTID operations.
pub type GtidResult<T> = Result<T, GtidError>;

/// Errors that can occur while parsing GTID sets, GTIDs or positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GtidError {
    /// A server identity is not a well-formed UUID.
    #[error("invalid server UUID '{text}'")]
    InvalidUuid {
        /// The offending text.
        text: String,
    },

    /// An entry names a server but no ranges.
    #[error("at least one range must be given for '{entry}'")]
    EmptyRangeList {
        /// The offending entry.
        entry: String,
    },

    /// A range whose start lies after its end.
    #[error("range {start}-{end} is not a valid range")]
    InvertedRange {
        /// First number of the range.
        start: u64,
        /// Last number of the range.
        end: u64,
    },

    /// A range bound or position is not a non-negative integer.
    #[error("invalid number '{text}'")]
    InvalidNumber {
        /// The offending text.
        text: String,
    },

    /// A range has more than two bounds or an empty bound.
    #[error("malformed range '{text}'")]
    MalformedRange {
        /// The offending text.
        text: String,
    },

    /// A value lacks the separator its textual form requires.
    #[error("malformed {what} '{text}'")]
    Malformed {
        /// What was being parsed.
        what: &'static str,
        /// The offending text.
        text: String,
    },
}

impl GtidError {
    /// Creates an invalid number error.
    pub fn invalid_number(text: impl Into<String>) -> Self {
        Self::InvalidNumber { text: text.into() }
    }

    /// Creates a malformed range error.
    pub fn malformed_range(text: impl Into<String>) -> Self {
        Self::MalformedRange { text: text.into() }
    }

    /// Creates a malformed value error.
    pub fn malformed(what: &'static str, text: impl Into<String>) -> Self {
        Self::Malformed {
            what,
            text: text.into(),
        }
    }
}

/// Parses a non-negative decimal integer.
pub(crate) fn parse_number(text: &str) -> GtidResult<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GtidError::invalid_number(text));
    }
    text.parse().map_err(|_| GtidError::invalid_number(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number("42").unwrap(), 42);
        assert_eq!(parse_number(" 7 ").unwrap(), 7);
        assert!(parse_number("").is_err());
        assert!(parse_number("-1").is_err());
        assert!(parse_number("+1").is_err());
        assert!(parse_number("99999999999999999999").is_err());
    }

    #[test]
    fn messages() {
        let err = GtidError::InvertedRange { start: 10, end: 6 };
        assert_eq!(err.to_string(), "range 10-6 is not a valid range");
    }
}
