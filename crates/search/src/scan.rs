//! Scan-based engines
//!
//! Both engines visit every stored document on every query, so search cost is
//! linear in the corpus size. They are kept as baselines for the inverted
//! index and as a brute-force reference in tests.
//!
//! Re-ingesting an id replaces what was stored for it.

use crate::engine::SearchEngine;
use crate::tokenizer::token_set;
use parking_lot::RwLock;
use sift_core::DocId;
use std::collections::{BTreeMap, HashSet};

// ============================================================================
// SimpleEngine
// ============================================================================

/// Stores raw text; a document matches when the query is a substring of it
///
/// The query is not tokenized, so `"cat sat"` only matches documents where
/// those words appear adjacent and with exactly that spacing and case.
#[derive(Debug)]
pub struct SimpleEngine<D> {
    texts: RwLock<BTreeMap<D, String>>,
}

impl<D: DocId> Default for SimpleEngine<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DocId> SimpleEngine<D> {
    /// Create an empty engine
    pub fn new() -> Self {
        SimpleEngine {
            texts: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.texts.read().len()
    }

    /// Check if no document is stored
    pub fn is_empty(&self) -> bool {
        self.texts.read().is_empty()
    }
}

impl<D: DocId> SearchEngine for SimpleEngine<D> {
    type Id = D;

    fn process_document(&self, id: D, text: &str) {
        self.texts.write().insert(id, text.to_string());
    }

    fn search(&self, query: &str) -> Vec<D> {
        self.texts
            .read()
            .iter()
            .filter(|(_, text)| text.contains(query))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

// ============================================================================
// BagOfWordsEngine
// ============================================================================

/// Stores each document's token set; a document matches when it holds every
/// query token
#[derive(Debug)]
pub struct BagOfWordsEngine<D> {
    words: RwLock<BTreeMap<D, HashSet<String>>>,
}

impl<D: DocId> Default for BagOfWordsEngine<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DocId> BagOfWordsEngine<D> {
    /// Create an empty engine
    pub fn new() -> Self {
        BagOfWordsEngine {
            words: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.words.read().len()
    }

    /// Check if no document is stored
    pub fn is_empty(&self) -> bool {
        self.words.read().is_empty()
    }
}

impl<D: DocId> SearchEngine for BagOfWordsEngine<D> {
    type Id = D;

    fn process_document(&self, id: D, text: &str) {
        self.words.write().insert(id, token_set(text));
    }

    fn search(&self, query: &str) -> Vec<D> {
        let query = token_set(query);
        if query.is_empty() {
            return Vec::new();
        }

        self.words
            .read()
            .iter()
            .filter(|(_, words)| query.iter().all(|q| words.contains(q)))
            .map(|(id, _)| id.clone())
            .collect()
    }
}
