//! Search infrastructure for sift
//!
//! This crate provides:
//! - Bag-of-words tokenizer
//! - InvertedIndex with sorted posting lists
//! - K-way sorted-list intersection for conjunctive queries
//! - SearchEngine trait shared by every strategy
//! - Scan-based SimpleEngine and BagOfWordsEngine baselines
//! - QueryCache and the CachedEngine decorator
//!
//! # Usage
//!
//! ```
//! use sift_search::{CachedEngine, InvertedIndex, SearchEngine};
//!
//! let engine = CachedEngine::new(InvertedIndex::new());
//! engine.process_document(1u32, "the cat sat");
//! engine.process_document(2u32, "the dog sat");
//!
//! assert_eq!(engine.search("the sat"), vec![1, 2]);
//! assert_eq!(engine.search("cat"), vec![1]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod engine;
pub mod index;
pub mod intersect;
pub mod scan;
pub mod tokenizer;

use sift_core::{DocId, EngineKind};

// Re-export commonly used types
pub use cache::{CacheStats, CachedEngine, QueryCache};
pub use engine::{DynEngine, SearchEngine};
pub use index::{InvertedIndex, PostingList};
pub use intersect::intersect_sorted;
pub use scan::{BagOfWordsEngine, SimpleEngine};
pub use tokenizer::{token_set, tokenize, tokenize_unique};

/// Build the engine strategy named by `kind`
pub fn build_engine<D: DocId>(kind: EngineKind) -> DynEngine<D> {
    match kind {
        EngineKind::Inverted => Box::new(InvertedIndex::new()),
        EngineKind::BagOfWords => Box::new(BagOfWordsEngine::new()),
        EngineKind::Simple => Box::new(SimpleEngine::new()),
    }
}
