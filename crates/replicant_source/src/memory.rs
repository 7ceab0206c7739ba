//! In-memory log source.

use crate::error::SourceResult;
use crate::source::LogSource;

/// A source over owned bytes.
///
/// Suitable for:
/// - Unit and integration tests
/// - Logs already captured into memory
///
/// # Example
///
/// ```rust
/// use replicant_source::{LogSource, MemorySource};
///
/// let mut source = MemorySource::new(b"test data".to_vec());
/// let mut buf = [0u8; 4];
/// assert_eq!(source.read_full(&mut buf).unwrap(), 4);
/// assert_eq!(&buf, b"test");
/// assert_eq!(source.position(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
    pos: usize,
}

impl MemorySource {
    /// Creates a source positioned at the start of `data`.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns all bytes, including those already consumed.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for MemorySource {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl LogSource for MemorySource {
    fn read(&mut self, buf: &mut [u8]) -> SourceResult<usize> {
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_new_is_at_start() {
        let source = MemorySource::new(b"hello".to_vec());
        assert_eq!(source.position(), 0);
        assert_eq!(source.remaining(), b"hello");
    }

    #[test]
    fn memory_reads_in_order() {
        let mut source = MemorySource::new(b"hello world".to_vec());
        let mut buf = [0u8; 5];

        assert_eq!(source.read_full(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"hello");

        let mut rest = [0u8; 6];
        assert_eq!(source.read_full(&mut rest).unwrap(), 6);
        assert_eq!(&rest, b" world");
        assert_eq!(source.position(), 11);
    }

    #[test]
    fn memory_short_read_at_end() {
        let mut source = MemorySource::from(&b"abc"[..]);
        let mut buf = [0u8; 10];
        assert_eq!(source.read_full(&mut buf).unwrap(), 3);
        assert_eq!(source.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn memory_empty_source() {
        let mut source = MemorySource::default();
        let mut buf = [0u8; 4];
        assert_eq!(source.read_full(&mut buf).unwrap(), 0);
        assert_eq!(source.position(), 0);
        assert!(source.data().is_empty());
    }

    #[test]
    fn boxed_source_delegates() {
        let mut source: Box<dyn LogSource> = Box::new(MemorySource::new(vec![1, 2, 3]));
        let mut buf = [0u8; 2];
        assert_eq!(source.read_full(&mut buf).unwrap(), 2);
        assert_eq!(source.position(), 2);
    }
}
