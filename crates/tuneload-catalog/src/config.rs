use std::path::PathBuf;

use anyhow::{Result, bail};
use tuneload_core::ProcessorConfig;

/// Inputs and processor settings for one catalog load.
///
/// An unset input is skipped; the rest load in artist, genre, link order.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Artist export file (`.gz` accepted)
    pub artist: Option<PathBuf>,
    /// Genre export file
    pub genre: Option<PathBuf>,
    /// Artist-to-genre link export file
    pub artist_genre: Option<PathBuf>,
    pub processor: ProcessorConfig,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            artist: Some(PathBuf::from("/tmp/input/artist")),
            genre: Some(PathBuf::from("/tmp/input/genre")),
            artist_genre: Some(PathBuf::from("/tmp/input/genre_artist")),
            processor: ProcessorConfig::default(),
        }
    }
}

impl LoadConfig {
    /// Reject settings no input could load with.
    pub fn validate(&self) -> Result<()> {
        if self.processor.batch_size == 0 {
            bail!("batch size must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LoadConfig::default();
        assert_eq!(config.processor.batch_size, 5000);
        assert_eq!(config.processor.skip_prefix, "#");
        assert_eq!(
            config.artist_genre.as_deref(),
            Some(std::path::Path::new("/tmp/input/genre_artist"))
        );
        config.validate().unwrap();
    }

    #[test]
    fn zero_batch_size_rejected() {
        let mut config = LoadConfig::default();
        config.processor.batch_size = 0;
        assert!(config.validate().is_err());
    }
}
