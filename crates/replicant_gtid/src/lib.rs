//! # Replicant GTID
//!
//! Replication positions for MySQL-style servers.
//!
//! A server that assigns global transaction identifiers names each
//! transaction with the [`ServerUuid`] of the server that first committed
//! it and a sequence number. A replica records everything it has applied
//! as a [`GtidSet`]: per server, a list of inclusive [`GtidRange`]s kept in
//! normal form. Sets are merged with [`GtidSet::union`] and compared by
//! coverage, which gives a partial order.
//!
//! Servers without GTIDs track progress as a [`BinlogPosition`] instead.
//!
//! ## Example
//!
//! ```
//! use replicant_gtid::GtidSet;
//!
//! let applied: GtidSet = "3e11fa47-71ca-11e1-9e33-c80aa9429562:2-5:7-9".parse().unwrap();
//! let source: GtidSet = "3e11fa47-71ca-11e1-9e33-c80aa9429562:1-10".parse().unwrap();
//!
//! assert!(applied < source);
//! assert_eq!(GtidSet::compare(&applied, &source), (false, true));
//!
//! let merged = applied | &source;
//! assert_eq!(merged.to_string(), "3e11fa47-71ca-11e1-9e33-c80aa9429562:1-10");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod gtid;
mod position;
mod range;
mod server_uuid;
mod set;

pub use error::{GtidError, GtidResult};
pub use gtid::Gtid;
pub use position::BinlogPosition;
pub use range::{is_normalized, normalize, GtidRange};
pub use server_uuid::ServerUuid;
pub use set::GtidSet;
