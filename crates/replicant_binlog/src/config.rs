//! Reader configuration.

/// Configuration for decoding a binary log stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Largest record size accepted, in bytes.
    ///
    /// Headers announcing more are rejected before the body is allocated.
    pub max_event_size: u32,

    /// Whether a record whose `end_offset - size` differs from its actual
    /// offset is an error (otherwise it is only logged).
    pub verify_positions: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_event_size: 1024 * 1024 * 1024, // 1 GiB
            verify_positions: false,
        }
    }
}

impl ReaderConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest accepted record size.
    #[must_use]
    pub const fn max_event_size(mut self, size: u32) -> Self {
        self.max_event_size = size;
        self
    }

    /// Sets whether position mismatches are fatal.
    #[must_use]
    pub const fn verify_positions(mut self, value: bool) -> Self {
        self.verify_positions = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.max_event_size, 1 << 30);
        assert!(!config.verify_positions);
    }

    #[test]
    fn builder_pattern() {
        let config = ReaderConfig::new()
            .max_event_size(4096)
            .verify_positions(true);

        assert_eq!(config.max_event_size, 4096);
        assert!(config.verify_positions);
    }
}
