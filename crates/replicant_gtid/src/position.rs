//! File-and-offset replication positions.

use crate::error::{parse_number, GtidError, GtidResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position in a server's binary log, written `file:position`.
///
/// Positions order lexicographically by file name, then by offset, which
/// matches the numbered-suffix naming of binary log files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BinlogPosition {
    /// Binary log file name.
    pub file: String,
    /// Byte offset in the file.
    pub position: u64,
}

impl BinlogPosition {
    /// Creates a position.
    pub fn new(file: impl Into<String>, position: u64) -> Self {
        Self {
            file: file.into(),
            position,
        }
    }

    /// Parses `file:position`, splitting on the last `:`.
    ///
    /// # Errors
    ///
    /// Returns an error if the separator is missing, the file name is empty
    /// or the offset is not an integer.
    pub fn parse(text: &str) -> GtidResult<Self> {
        let text = text.trim();
        match text.rsplit_once(':') {
            Some((file, position)) if !file.is_empty() => {
                Ok(Self::new(file, parse_number(position)?))
            }
            _ => Err(GtidError::malformed("binary log position", text)),
        }
    }
}

impl fmt::Display for BinlogPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.position)
    }
}

impl FromStr for BinlogPosition {
    type Err = GtidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let pos: BinlogPosition = "master-bin.000003:1077".parse().unwrap();
        assert_eq!(pos, BinlogPosition::new("master-bin.000003", 1077));
        assert_eq!(pos.to_string(), "master-bin.000003:1077");
    }

    #[test]
    fn rejects_malformed() {
        assert!(BinlogPosition::parse("master-bin.000003").is_err());
        assert!(BinlogPosition::parse(":4").is_err());
        assert!(BinlogPosition::parse("master-bin.000003:x").is_err());
    }

    #[test]
    fn orders_by_file_then_offset() {
        let a = BinlogPosition::new("master-bin.000001", 9000);
        let b = BinlogPosition::new("master-bin.000002", 4);
        let c = BinlogPosition::new("master-bin.000002", 106);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.clone().max(c.clone()), c);
    }
}
