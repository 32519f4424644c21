//! Core types for sift
//!
//! This crate defines the foundational pieces shared by the engine and the CLI:
//! - Error: Error type hierarchy
//! - DocId / Document: document identity and the (id, text) pair
//! - SiftConfig: `sift.toml` configuration
//! - DirectoryCorpus: corpus supplier reading one document per file

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod types;

pub use config::{EngineKind, SiftConfig, CONFIG_FILE_NAME, DEFAULT_CACHE_CAPACITY};
pub use corpus::DirectoryCorpus;
pub use error::{Error, Result};
pub use types::{DocId, Document};
