//! Common record header.

use crate::kind::EventKind;
use replicant_codec::Field;

/// The fixed header at the start of every binary log record.
///
/// ## Layout (19 bytes, little-endian)
///
/// ```text
/// | timestamp (4) | type (1) | server_id (4) | size (4) | end_offset (4) | flags (2) |
/// ```
///
/// `offset` is not stored in the record; it is the stream position at which
/// the header was read (or, for textual logs, the `# at` marker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHeader {
    /// Stream offset of the first header byte.
    pub offset: u64,
    /// Seconds since the Unix epoch when the statement began.
    pub timestamp: u32,
    /// Raw type code.
    pub type_code: u8,
    /// Id of the server that originated the event.
    pub server_id: u32,
    /// Total record size, header included.
    pub size: u32,
    /// Offset of the byte following this record.
    pub end_offset: u32,
    /// Header flag bits.
    pub flags: u16,
}

type RawHeader = (u32, u8, u32, u32, u32, u16);

impl RecordHeader {
    /// Encoded length of the header.
    pub const LENGTH: usize = 19;

    /// Builds a header from its encoded bytes found at `offset`.
    #[must_use]
    pub fn from_bytes(offset: u64, raw: &[u8; Self::LENGTH]) -> Self {
        let (timestamp, type_code, server_id, size, end_offset, flags) =
            RawHeader::from_le_slice(raw);
        Self {
            offset,
            timestamp,
            type_code,
            server_id,
            size,
            end_offset,
            flags,
        }
    }

    /// Returns the kind named by the type code, if it is in the table.
    #[must_use]
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_code(self.type_code)
    }

    /// Number of body bytes following the header.
    #[must_use]
    pub fn body_len(&self) -> usize {
        (self.size as usize).saturating_sub(Self::LENGTH)
    }

    /// Start offset implied by `end_offset - size`.
    ///
    /// Returns `None` when the record carries no position (`end_offset` is
    /// zero, as in relay logs and artificial events) or the values are
    /// inconsistent.
    #[must_use]
    pub fn claimed_offset(&self) -> Option<u64> {
        if self.end_offset == 0 {
            return None;
        }
        self.end_offset.checked_sub(self.size).map(u64::from)
    }
}
