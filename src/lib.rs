//! Sift - minimal in-memory full-text search
//!
//! Sift ingests a corpus of (id, text) pairs into an inverted index and answers
//! conjunctive queries: "which documents contain all of these words". An LRU
//! cache in front of the engine absorbs repeated identical queries.
//!
//! # Quick Start
//!
//! ```
//! use sift::{CachedEngine, Document, InvertedIndex, SearchEngine};
//!
//! let engine = CachedEngine::new(InvertedIndex::new());
//! let corpus = vec![
//!     Ok(Document::new(1u32, "the cat sat")),
//!     Ok(Document::new(2u32, "the dog sat")),
//!     Ok(Document::new(3u32, "cats and dogs")),
//! ];
//! engine.ingest(corpus)?;
//!
//! assert_eq!(engine.search("the sat"), vec![1, 2]);
//! assert!(engine.search("nonexistent").is_empty());
//! # Ok::<(), sift::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `sift-core`: errors, configuration, document identity, directory corpus
//! - `sift-search`: tokenizer, inverted index, K-way intersection, query cache

pub use sift_core::*;
pub use sift_search::*;
