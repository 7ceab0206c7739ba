//! Log source over an arbitrary reader.

use crate::error::SourceResult;
use crate::source::{read_retrying, LogSource};
use std::io::Read;

/// A source wrapping any [`Read`] implementation.
///
/// Use this for pipes and sockets, e.g. the standard output of a process
/// streaming a binary log. Reads block exactly as the wrapped reader does.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
    position: u64,
}

impl<R: Read + Send> StreamSource<R> {
    /// Wraps `inner`, counting positions from zero.
    pub fn new(inner: R) -> Self {
        Self::with_position(inner, 0)
    }

    /// Wraps `inner`, whose first byte sits at `position` in the log.
    ///
    /// Use this when the stream has already been advanced, for instance past
    /// the magic bytes.
    pub fn with_position(inner: R, position: u64) -> Self {
        Self { inner, position }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Send> LogSource for StreamSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> SourceResult<usize> {
        let n = read_retrying(&mut self.inner, buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn position(&self) -> u64 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    /// A reader that hands out at most `chunk` bytes per call.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        chunk: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.chunk).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn stream_counts_position() {
        let mut source = StreamSource::new(Cursor::new(b"abcdef".to_vec()));
        let mut buf = [0u8; 4];
        assert_eq!(source.read_full(&mut buf).unwrap(), 4);
        assert_eq!(source.position(), 4);
    }

    #[test]
    fn stream_with_initial_position() {
        let mut source = StreamSource::with_position(Cursor::new(vec![0u8; 3]), 4);
        let mut buf = [0u8; 3];
        source.read_full(&mut buf).unwrap();
        assert_eq!(source.position(), 7);
    }

    proptest! {
        #[test]
        fn read_full_reassembles_trickled_input(data in prop::collection::vec(any::<u8>(), 0..256), chunk in 1usize..17) {
            let mut source = StreamSource::new(Trickle { data: data.clone(), pos: 0, chunk });
            let mut buf = vec![0u8; data.len()];
            prop_assert_eq!(source.read_full(&mut buf).unwrap(), data.len());
            prop_assert_eq!(buf, data);
        }
    }
}
