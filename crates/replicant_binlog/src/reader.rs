//! Opening binary logs.
//!
//! A binary log is named by a locator of the form `scheme:rest`. A locator
//! without a colon is a plain file path.

use crate::config::ReaderConfig;
use crate::error::{BinlogError, BinlogResult};
use crate::iter::{EventIter, StubIter};
use replicant_source::{FileSource, LogSource};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Signature at the start of every binary log file.
pub const BINLOG_MAGIC: [u8; 4] = [0xFE, b'b', b'i', b'n'];

/// Where a binary log is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A local file.
    File(PathBuf),
}

impl Locator {
    /// Parses a locator.
    ///
    /// The text is split on the first `:`. Without a colon the whole text
    /// is taken as a file path.
    ///
    /// # Errors
    ///
    /// Returns [`BinlogError::UnrecognizedScheme`] for schemes other than
    /// `file`.
    pub fn parse(text: &str) -> BinlogResult<Self> {
        match text.split_once(':') {
            None => Ok(Self::File(PathBuf::from(text))),
            Some(("file", rest)) => Ok(Self::File(PathBuf::from(rest))),
            Some((scheme, _)) => Err(BinlogError::UnrecognizedScheme {
                scheme: scheme.to_string(),
            }),
        }
    }

    /// Returns the scheme name.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
        }
    }
}

impl FromStr for Locator {
    type Err = BinlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file:{}", path.display()),
        }
    }
}

/// Opens the binary log named by `locator`.
///
/// # Errors
///
/// Returns an error if the scheme is not recognized, the file cannot be
/// opened, or it does not start with [`BINLOG_MAGIC`].
pub fn open(locator: &str) -> BinlogResult<BinlogReader<Box<dyn LogSource>>> {
    open_with_config(locator, ReaderConfig::default())
}

/// Opens the binary log named by `locator` with a custom configuration.
///
/// # Errors
///
/// Same as [`open`].
pub fn open_with_config(
    locator: &str,
    config: ReaderConfig,
) -> BinlogResult<BinlogReader<Box<dyn LogSource>>> {
    let source: Box<dyn LogSource> = match Locator::parse(locator)? {
        Locator::File(path) => Box::new(FileSource::open(&path)?),
    };
    debug!(locator, "opened binary log");
    BinlogReader::with_config(source, config)
}

/// Opens a binary log file directly.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or does not start with
/// [`BINLOG_MAGIC`].
pub fn open_file(path: &Path) -> BinlogResult<BinlogReader<FileSource>> {
    BinlogReader::from_source(FileSource::open(path)?)
}

/// A binary log positioned after its magic bytes.
///
/// The reader owns its source. Iterating consumes it; a log cannot be
/// rewound.
#[derive(Debug)]
pub struct BinlogReader<S> {
    source: S,
    config: ReaderConfig,
}

impl<S: LogSource> BinlogReader<S> {
    /// Wraps `source`, checking the magic bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BinlogError::BadMagic`] if the first four bytes are not
    /// [`BINLOG_MAGIC`].
    pub fn from_source(source: S) -> BinlogResult<Self> {
        Self::with_config(source, ReaderConfig::default())
    }

    /// Wraps `source` with a custom configuration, checking the magic bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_source`].
    pub fn with_config(mut source: S, config: ReaderConfig) -> BinlogResult<Self> {
        let mut magic = [0u8; 4];
        let got = source.read_full(&mut magic)?;
        if got < magic.len() || magic != BINLOG_MAGIC {
            return Err(BinlogError::BadMagic {
                found: magic[..got].to_vec(),
            });
        }
        Ok(Self { source, config })
    }

    /// Wraps a source already positioned after the magic bytes.
    pub fn from_source_unchecked(source: S, config: ReaderConfig) -> Self {
        Self { source, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Current stream offset.
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    /// Iterates over undecoded records.
    pub fn stubs(self) -> StubIter<S> {
        StubIter::new(self.source, self.config)
    }

    /// Iterates over decoded events.
    pub fn events(self) -> EventIter<S> {
        EventIter::new(self.stubs())
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}
