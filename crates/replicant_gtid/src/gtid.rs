//! Single global transaction identifiers.

use crate::error::{parse_number, GtidError, GtidResult};
use crate::server_uuid::ServerUuid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One transaction: the source identity and its sequence number, written
/// `uuid:gno`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gtid {
    /// Identity of the originating server.
    pub uuid: ServerUuid,
    /// Transaction sequence number.
    pub gno: u64,
}

impl Gtid {
    /// Creates a GTID.
    #[must_use]
    pub const fn new(uuid: ServerUuid, gno: u64) -> Self {
        Self { uuid, gno }
    }

    /// Parses `uuid:gno`.
    ///
    /// # Errors
    ///
    /// Returns an error if the separator is missing, the identity is not a
    /// UUID or the number is not an integer.
    pub fn parse(text: &str) -> GtidResult<Self> {
        let text = text.trim();
        let (uuid, gno) = text
            .rsplit_once(':')
            .ok_or_else(|| GtidError::malformed("GTID", text))?;
        Ok(Self {
            uuid: ServerUuid::parse(uuid)?,
            gno: parse_number(gno)?,
        })
    }
}

impl fmt::Display for Gtid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uuid, self.gno)
    }
}

impl FromStr for Gtid {
    type Err = GtidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Gtid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Gtid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
