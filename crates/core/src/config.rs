//! Engine configuration via `sift.toml`
//!
//! The corpus location is an explicit configuration value handed to the
//! corpus loader, never derived from the location of the executable.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "sift.toml";

/// Default query cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Default corpus directory, relative to the working directory.
pub const DEFAULT_CORPUS_DIR: &str = "file2search";

/// Search strategy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Posting lists plus K-way intersection
    Inverted,
    /// Per-document token sets, scanned on every query
    BagOfWords,
    /// Raw text, substring scan on every query
    Simple,
}

impl EngineKind {
    /// Parse an engine name as it appears in `sift.toml` or on the command line.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "inverted" => Ok(EngineKind::Inverted),
            "bag_of_words" => Ok(EngineKind::BagOfWords),
            "simple" => Ok(EngineKind::Simple),
            other => Err(Error::config(format!(
                "Invalid engine '{}'. Expected \"inverted\", \"bag_of_words\" or \"simple\".",
                other
            ))),
        }
    }

    /// Name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Inverted => "inverted",
            EngineKind::BagOfWords => "bag_of_words",
            EngineKind::Simple => "simple",
        }
    }
}

/// Configuration loaded from `sift.toml`.
///
/// # Example
///
/// ```toml
/// corpus_dir = "file2search"
/// files = ["1.txt", "2.txt"]
/// engine = "inverted"
/// cache = true
/// cache_capacity = 32
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiftConfig {
    /// Directory holding the corpus files.
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: PathBuf,
    /// Explicit file names inside `corpus_dir`, ingested in the listed order.
    /// When absent, every regular file in the directory is ingested in
    /// ascending path order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// Search strategy: `"inverted"`, `"bag_of_words"` or `"simple"`.
    #[serde(default = "default_engine_str")]
    pub engine: String,
    /// Put the query cache in front of the engine.
    #[serde(default = "default_cache")]
    pub cache: bool,
    /// Maximum number of cached queries.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CORPUS_DIR)
}

fn default_engine_str() -> String {
    EngineKind::Inverted.as_str().to_string()
}

fn default_cache() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            corpus_dir: default_corpus_dir(),
            files: None,
            engine: default_engine_str(),
            cache: default_cache(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl SiftConfig {
    /// Parse the engine string into an `EngineKind`.
    pub fn engine_kind(&self) -> Result<EngineKind> {
        EngineKind::parse(&self.engine)
    }

    /// Check every field that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        self.engine_kind()?;
        if self.cache_capacity == 0 {
            return Err(Error::config("cache_capacity must be greater than zero"));
        }
        if let Some(files) = &self.files {
            if let Some(bad) = files.iter().find(|f| f.trim().is_empty()) {
                return Err(Error::config(format!("invalid file name {:?} in files", bad)));
            }
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Sift search engine configuration
#
# Directory holding the corpus. Every file is one document, identified by
# its path.
corpus_dir = "file2search"

# Optional explicit list of files inside corpus_dir, ingested in this order.
# When omitted, every regular file is ingested in ascending path order.
# files = ["1.txt", "2.txt", "3.txt", "4.txt", "5.txt"]

# Search strategy: "inverted" (default), "bag_of_words" or "simple"
engine = "inverted"

# LRU cache of query results, keyed by the raw query string
cache = true
cache_capacity = 32
"#
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SiftConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: SiftConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::io(path, e))?;
        }
        Ok(())
    }
}
