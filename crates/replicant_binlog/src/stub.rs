//! Undecoded records.
//!
//! A stub is a record whose header has been parsed but whose body has not
//! been interpreted yet. Splitting the two lets callers skim a log (for
//! offsets, types or sizes) without paying for body decoding, and keeps
//! the decoders pure functions of an in-memory stub.

use crate::config::ReaderConfig;
use crate::error::{BinlogError, BinlogResult};
use crate::header::RecordHeader;
use crate::kind::EventKind;
use bytes::Bytes;
use replicant_source::LogSource;
use tracing::warn;

/// A record header together with its raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStub {
    /// Parsed common header.
    pub header: RecordHeader,
    /// Body bytes following the header (`size - 19` of them).
    pub body: Bytes,
}

impl EventStub {
    /// Creates a stub from its parts.
    #[must_use]
    pub fn new(header: RecordHeader, body: impl Into<Bytes>) -> Self {
        Self {
            header,
            body: body.into(),
        }
    }

    /// Reads the next record from `source`.
    ///
    /// Returns `Ok(None)` when the source is exhausted before a complete
    /// header. Once a header has been read the record is expected to be
    /// complete.
    ///
    /// # Errors
    ///
    /// - [`BinlogError::InvalidRecordSize`] if the header declares fewer
    ///   than 19 bytes
    /// - [`BinlogError::EventTooLarge`] if it declares more than
    ///   `config.max_event_size`
    /// - [`BinlogError::TruncatedRecord`] if the body is cut short
    /// - [`BinlogError::Source`] on read failure
    pub fn read<S>(source: &mut S, config: &ReaderConfig) -> BinlogResult<Option<Self>>
    where
        S: LogSource + ?Sized,
    {
        let offset = source.position();
        let mut raw = [0u8; RecordHeader::LENGTH];
        let got = source.read_full(&mut raw)?;
        if got < RecordHeader::LENGTH {
            if got > 0 {
                warn!(offset, bytes = got, "partial record header at end of stream");
            }
            return Ok(None);
        }

        let header = RecordHeader::from_bytes(offset, &raw);
        if (header.size as usize) < RecordHeader::LENGTH {
            return Err(BinlogError::InvalidRecordSize {
                offset,
                size: header.size,
            });
        }
        if header.size > config.max_event_size {
            return Err(BinlogError::EventTooLarge {
                offset,
                size: header.size,
                max: config.max_event_size,
            });
        }

        let expected = header.body_len();
        let mut body = vec![0u8; expected];
        let actual = source.read_full(&mut body)?;
        if actual < expected {
            return Err(BinlogError::TruncatedRecord {
                offset,
                expected,
                actual,
            });
        }

        Ok(Some(Self {
            header,
            body: Bytes::from(body),
        }))
    }

    /// Kind named by the header, if the type code is in the table.
    #[must_use]
    pub fn kind(&self) -> Option<EventKind> {
        self.header.kind()
    }

    /// Offset of the byte following this record in the stream.
    #[must_use]
    pub fn next_offset(&self) -> u64 {
        self.header.offset + u64::from(self.header.size)
    }
}
