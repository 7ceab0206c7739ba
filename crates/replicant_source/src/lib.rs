//! # Replicant Source
//!
//! Sequential byte sources for Replicant log readers.
//!
//! This crate provides the lowest-level input abstraction. Sources are
//! **opaque byte streams** - they do not interpret the data they yield.
//!
//! ## Design Principles
//!
//! - Sources are forward-only (read, position)
//! - No knowledge of binary log magic, headers or events
//! - Must be `Send` so a reader can move to a worker thread
//! - `replicant_binlog` owns all format interpretation
//!
//! ## Available Sources
//!
//! - [`MemorySource`] - For tests and already-captured logs
//! - [`FileSource`] - For local files
//! - [`StreamSource`] - For pipes and any other [`std::io::Read`]
//!
//! ## Example
//!
//! ```rust
//! use replicant_source::{LogSource, MemorySource};
//!
//! let mut source = MemorySource::new(b"\xfebin".to_vec());
//! let mut magic = [0u8; 4];
//! source.read_full(&mut magic).unwrap();
//! assert_eq!(&magic, b"\xfebin");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod source;
mod stream;

pub use error::{SourceError, SourceResult};
pub use file::FileSource;
pub use memory::MemorySource;
pub use source::LogSource;
pub use stream::StreamSource;
