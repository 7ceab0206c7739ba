//! File-based log source.

use crate::error::{SourceError, SourceResult};
use crate::source::{read_retrying, LogSource};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// A buffered, read-only file source.
///
/// # Example
///
/// ```no_run
/// use replicant_source::{FileSource, LogSource};
/// use std::path::Path;
///
/// let mut source = FileSource::open(Path::new("mysqld-bin.000001")).unwrap();
/// let mut magic = [0u8; 4];
/// source.read_full(&mut magic).unwrap();
/// ```
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    reader: BufReader<File>,
    size: u64,
    position: u64,
}

impl FileSource {
    /// Opens the file at `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] if the file does not exist, or an
    /// I/O error if it cannot be opened.
    pub fn open(path: &Path) -> SourceResult<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound {
                path: path.to_path_buf(),
            },
            _ => SourceError::Io(e),
        })?;

        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            size,
            position: 0,
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file size at the time it was opened.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl LogSource for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> SourceResult<usize> {
        let n = read_retrying(&mut self.reader, buf)?;
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
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(path: &Path, data: &[u8]) {
        let mut file = File::create(path).unwrap();
        file.write_all(data).unwrap();
        file.sync_all().unwrap();
    }

    #[test]
    fn file_read_all() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.bin");
        write_file(&path, b"hello world");

        let mut source = FileSource::open(&path).unwrap();
        assert_eq!(source.size(), 11);

        let mut buf = [0u8; 11];
        assert_eq!(source.read_full(&mut buf).unwrap(), 11);
        assert_eq!(&buf, b"hello world");
        assert_eq!(source.position(), 11);
    }

    #[test]
    fn file_short_read_at_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.bin");
        write_file(&path, b"abc");

        let mut source = FileSource::open(&path).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(source.read_full(&mut buf).unwrap(), 3);
        assert_eq!(source.read_full(&mut buf).unwrap(), 0);
        assert_eq!(source.position(), 3);
    }

    #[test]
    fn file_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.bin");

        let result = FileSource::open(&path);
        assert!(matches!(result, Err(SourceError::NotFound { .. })));
    }

    #[test]
    fn file_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.bin");
        write_file(&path, b"");

        let source = FileSource::open(&path).unwrap();
        assert_eq!(source.path(), path);
        assert_eq!(source.size(), 0);
    }
}
