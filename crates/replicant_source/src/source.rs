//! Log source trait definition.

use crate::error::SourceResult;

/// A sequential byte source for log readers.
///
/// Sources are **opaque byte streams**. They know nothing about binary log
/// magic, record headers or events; `replicant_binlog` owns all format
/// interpretation.
///
/// # Invariants
///
/// - `position` equals the total number of bytes returned by `read` so far
/// - A `read` returning `0` for a non-empty buffer means end of stream
/// - Sources are forward-only and cannot be rewound
///
/// # Implementors
///
/// - [`super::FileSource`] - A local file
/// - [`super::MemorySource`] - Owned bytes, for tests and captured logs
/// - [`super::StreamSource`] - Any [`std::io::Read`], such as a pipe
pub trait LogSource: Send {
    /// Reads up to `buf.len()` bytes, returning how many were read.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    fn read(&mut self, buf: &mut [u8]) -> SourceResult<usize>;

    /// Returns the number of bytes consumed since the source was opened.
    fn position(&self) -> u64;

    /// Reads until `buf` is full or the source is exhausted.
    ///
    /// Returns the number of bytes placed in `buf`; a value smaller than
    /// `buf.len()` means the stream ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    fn read_full(&mut self, buf: &mut [u8]) -> SourceResult<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> SourceResult<usize> {
        (**self).read(buf)
    }

    fn position(&self) -> u64 {
        (**self).position()
    }
}

/// Reads from `reader`, retrying reads interrupted by a signal.
pub(crate) fn read_retrying<R: std::io::Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
) -> SourceResult<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
