//! Server identity.

use crate::error::{GtidError, GtidResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The 128-bit identity of a replication source (`server_uuid`).
///
/// Any textual form accepted by [`Uuid::parse_str`] is accepted (hyphenated,
/// simple, braced or URN). The canonical form, used for display and
/// ordering, is lowercase hyphenated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerUuid(Uuid);

impl ServerUuid {
    /// Creates an identity from raw bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Creates a new random identity.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identity.
    ///
    /// # Errors
    ///
    /// Returns [`GtidError::InvalidUuid`] if `text` is not a UUID.
    pub fn parse(text: &str) -> GtidResult<Self> {
        let text = text.trim();
        Uuid::parse_str(text)
            .map(Self)
            .map_err(|_| GtidError::InvalidUuid {
                text: text.to_string(),
            })
    }

    /// Returns the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Converts to a UUID.
    #[must_use]
    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for ServerUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServerUuid({})", self.0.hyphenated())
    }
}

impl fmt::Display for ServerUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ServerUuid {
    type Err = GtidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for ServerUuid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ServerUuid> for Uuid {
    fn from(id: ServerUuid) -> Self {
        id.0
    }
}

impl Serialize for ServerUuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ServerUuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
