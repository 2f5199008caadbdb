//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use tuneload_catalog::LoadConfig;
use tuneload_core::{DrainPolicy, ProcessorConfig};

/// Global configuration for tuneload
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub input: InputConfig,
    pub load: LoadSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// DuckDB database file
    #[serde(deserialize_with = "deserialize_env_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("music.duckdb"),
        }
    }
}

/// Export files; an empty value (or unset `${VAR}`) disables that input.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    #[serde(deserialize_with = "deserialize_env_input")]
    pub artist: Option<PathBuf>,
    #[serde(deserialize_with = "deserialize_env_input")]
    pub genre: Option<PathBuf>,
    #[serde(deserialize_with = "deserialize_env_input")]
    pub artist_genre: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        let defaults = LoadConfig::default();
        Self {
            artist: defaults.artist,
            genre: defaults.genre,
            artist_genre: defaults.artist_genre,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoadSection {
    pub batch_size: usize,
    pub skip_prefix: String,
    /// Fail the file when its final batch cannot be stored
    pub strict_drain: bool,
}

impl Default for LoadSection {
    fn default() -> Self {
        let defaults = ProcessorConfig::default();
        Self {
            batch_size: defaults.batch_size,
            skip_prefix: defaults.skip_prefix,
            strict_drain: defaults.drain == DrainPolicy::Strict,
        }
    }
}

/// Deserialize a path that may be a ${VAR} reference; the variable must be set
fn deserialize_env_path<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    expand_env_var(&s)
        .map(PathBuf::from)
        .ok_or_else(|| serde::de::Error::custom(format!("environment variable in {s} is not set")))
}

/// Deserialize an optional input path; empty or unset ${VAR} means no input
fn deserialize_env_input<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .and_then(|s| expand_env_var(&s))
        .filter(|s| !s.is_empty())
        .map(PathBuf::from))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./tuneload.toml (current directory)
    /// 2. ~/.config/tuneload/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("tuneload.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "tuneload") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Catalog load settings before command-line overrides
    pub fn load_config(&self) -> LoadConfig {
        LoadConfig {
            artist: self.input.artist.clone(),
            genre: self.input.genre.clone(),
            artist_genre: self.input.artist_genre.clone(),
            processor: ProcessorConfig {
                batch_size: self.load.batch_size,
                skip_prefix: self.load.skip_prefix.clone(),
                drain: if self.load.strict_drain {
                    DrainPolicy::Strict
                } else {
                    DrainPolicy::Lenient
                },
            },
        }
    }
}
