//! Error types for source operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while opening or reading a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file named by a locator does not exist.
    #[error("source not found: {}", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },
}
