//! # Replicant Testkit
//!
//! Test utilities for Replicant.
//!
//! This crate provides:
//! - Byte-exact binary log fixtures and `mysqlbinlog`-style text fixtures
//! - Property-based test generators using proptest
//! - Shared GTID test vectors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use replicant_testkit::prelude::*;
//!
//! #[test]
//! fn decodes_commit() {
//!     let log = BinlogBuilder::new().xid(7).build();
//!     // ... feed `log` to a reader
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
