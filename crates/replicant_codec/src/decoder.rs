//! Cursor-based field decoder.

use crate::error::{CodecError, CodecResult};
use crate::field::Field;

/// Reads fields from a byte buffer at an advancing cursor.
///
/// Every read either consumes exactly the bytes it needs and advances the
/// cursor, or fails with [`CodecError::Truncated`] and leaves the cursor
/// where it was.
#[derive(Debug, Clone)]
pub struct FieldDecoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldDecoder<'a> {
    /// Create a new decoder positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check if all bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Read a fixed-width field (or tuple of fields).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] if fewer than `L::WIDTH` bytes remain.
    #[inline]
    pub fn read<L: Field>(&mut self) -> CodecResult<L> {
        let bytes = self.read_bytes(L::WIDTH)?;
        Ok(L::from_le_slice(bytes))
    }

    /// Read exactly `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] if fewer than `len` bytes remain.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::Truncated {
                offset: self.pos,
                requested: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Read a one-byte length followed by that many bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] if the length byte or the payload
    /// is missing. The cursor is left at its original position.
    pub fn read_length_prefixed(&mut self) -> CodecResult<&'a [u8]> {
        let start = self.pos;
        let len = self.read::<u8>()?;
        self.read_bytes(usize::from(len)).inspect_err(|_| {
            self.pos = start;
        })
    }

    /// Skip `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] if fewer than `len` bytes remain.
    pub fn skip(&mut self, len: usize) -> CodecResult<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Consume and return every byte after the cursor.
    pub fn rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.pos..];
        self.pos = self.data.len();
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn read_advances_cursor() {
        let data = [1, 0, 2, 0, 0, 0, 9];
        let mut decoder = FieldDecoder::new(&data);
        assert_eq!(decoder.read::<u16>().unwrap(), 1);
        assert_eq!(decoder.position(), 2);
        assert_eq!(decoder.read::<u32>().unwrap(), 2);
        assert_eq!(decoder.position(), 6);
        assert_eq!(decoder.remaining(), 1);
        assert_eq!(decoder.read::<u8>().unwrap(), 9);
        assert!(decoder.is_empty());
    }

    #[test]
    fn truncated_read_keeps_cursor() {
        let data = [1, 2, 3];
        let mut decoder = FieldDecoder::new(&data);
        decoder.read::<u8>().unwrap();
        let err = decoder.read::<u32>().unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                offset: 1,
                requested: 4,
                available: 2,
            }
        );
        assert_eq!(decoder.position(), 1);
    }

    #[test]
    fn length_prefixed() {
        let data = [3, b'a', b'b', b'c', 0];
        let mut decoder = FieldDecoder::new(&data);
        assert_eq!(decoder.read_length_prefixed().unwrap(), b"abc");
        assert_eq!(decoder.position(), 4);
    }

    #[test]
    fn length_prefixed_short_payload_restores_cursor() {
        let data = [5, b'a', b'b'];
        let mut decoder = FieldDecoder::new(&data);
        assert!(matches!(
            decoder.read_length_prefixed(),
            Err(CodecError::Truncated { requested: 5, .. })
        ));
        assert_eq!(decoder.position(), 0);
    }

    #[test]
    fn empty_length_prefixed() {
        let mut decoder = FieldDecoder::new(&[0]);
        assert_eq!(decoder.read_length_prefixed().unwrap(), b"");
        assert!(decoder.is_empty());
    }

    #[test]
    fn read_exact_bytes_and_rest() {
        let data = b"headerbody";
        let mut decoder = FieldDecoder::new(data);
        assert_eq!(decoder.read_bytes(6).unwrap(), b"header");
        assert_eq!(decoder.rest(), b"body");
        assert!(decoder.is_empty());
        assert_eq!(decoder.rest(), b"");
    }

    #[test]
    fn skip_past_end_fails() {
        let mut decoder = FieldDecoder::new(&[0, 0]);
        assert!(decoder.skip(3).is_err());
        decoder.skip(2).unwrap();
        assert!(decoder.is_empty());
    }

    proptest! {
        #[test]
        fn reads_never_overrun(data in prop::collection::vec(any::<u8>(), 0..64), widths in prop::collection::vec(0usize..12, 0..16)) {
            let mut decoder = FieldDecoder::new(&data);
            let mut consumed = 0usize;
            for width in widths {
                match decoder.read_bytes(width) {
                    Ok(bytes) => {
                        prop_assert_eq!(bytes, &data[consumed..consumed + width]);
                        consumed += width;
                    }
                    Err(_) => prop_assert!(width > data.len() - consumed),
                }
                prop_assert_eq!(decoder.position(), consumed);
            }
        }
    }
}
