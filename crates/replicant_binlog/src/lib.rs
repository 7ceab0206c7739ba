//! # Replicant Binlog
//!
//! Decoding of MySQL binary logs into typed events.
//!
//! A binary log file is the 4-byte signature [`BINLOG_MAGIC`] followed by
//! contiguous records. Each record is a 19-byte [`RecordHeader`] and a body
//! whose layout depends on the type code. Decoding happens in two steps:
//!
//! 1. [`EventStub::read`] frames one record from a byte source
//! 2. [`decode`] turns a stub into an [`Event`]
//!
//! [`BinlogReader::events`] chains both lazily, so a log of any size is
//! processed one record at a time.
//!
//! The [`text`] module recovers the same [`Event`] type from the textual
//! output of `mysqlbinlog`.
//!
//! ## Example
//!
//! ```
//! use replicant_binlog::{BinlogReader, EventData, BINLOG_MAGIC};
//! use replicant_source::MemorySource;
//!
//! let mut log = BINLOG_MAGIC.to_vec();
//! // Xid event: header (19 bytes) followed by an 8-byte transaction id.
//! log.extend_from_slice(&0u32.to_le_bytes()); // timestamp
//! log.push(16); // type code
//! log.extend_from_slice(&1u32.to_le_bytes()); // server id
//! log.extend_from_slice(&27u32.to_le_bytes()); // size
//! log.extend_from_slice(&31u32.to_le_bytes()); // end offset
//! log.extend_from_slice(&0u16.to_le_bytes()); // flags
//! log.extend_from_slice(&42u64.to_le_bytes());
//!
//! let reader = BinlogReader::from_source(MemorySource::new(log)).unwrap();
//! for event in reader.events() {
//!     let event = event.unwrap();
//!     assert!(matches!(event.data, EventData::Xid(ref x) if x.xid == 42));
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod decode;
mod error;
mod event;
mod header;
mod iter;
mod kind;
mod reader;
mod stub;
pub mod text;

pub use config::ReaderConfig;
pub use decode::decode;
pub use error::{BinlogError, BinlogResult};
pub use event::{
    Event, EventData, FormatDescriptionEvent, IntVarEvent, IntVarKind, QueryEvent, RandEvent,
    RotateEvent, StartEvent, StatusVar, UserVarEvent, UserVarValue, XidEvent,
};
pub use header::RecordHeader;
pub use iter::{EventIter, StubIter};
pub use kind::EventKind;
pub use reader::{open, open_file, open_with_config, BinlogReader, Locator, BINLOG_MAGIC};
pub use stub::EventStub;
pub use text::{TextEventIter, TextLogReader};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
