//! # Replicant Codec
//!
//! Field-level decoding for binary log records.
//!
//! Binary log bodies are sequences of little-endian fixed-width integers,
//! fixed-size byte arrays and length-prefixed strings. This crate provides a
//! [`FieldDecoder`] that reads them at an advancing cursor:
//!
//! - [`FieldDecoder::read`] reads any [`Field`], including tuples
//! - [`FieldDecoder::read_length_prefixed`] reads a one-byte length and payload
//! - [`FieldDecoder::read_bytes`] reads exactly `n` bytes
//!
//! A read that would run past the end of the buffer fails with
//! [`CodecError::Truncated`] and does not move the cursor.
//!
//! ## Usage
//!
//! ```
//! use replicant_codec::FieldDecoder;
//!
//! let body = [42, 0, 0, 0, 3, b'a', b'b', b'c'];
//! let mut decoder = FieldDecoder::new(&body);
//! assert_eq!(decoder.read::<u32>().unwrap(), 42);
//! assert_eq!(decoder.read_length_prefixed().unwrap(), b"abc");
//! assert!(decoder.is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod error;
mod field;

pub use decoder::FieldDecoder;
pub use error::{CodecError, CodecResult};
pub use field::Field;
