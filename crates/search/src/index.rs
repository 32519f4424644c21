//! Inverted index for conjunctive keyword search
//!
//! This module provides:
//! - PostingList: sorted, duplicate-free document ids for one token
//! - InvertedIndex: token -> PostingList mapping with K-way intersection search
//! - Version watermark bumped on every ingestion that changes the index
//!
//! # Ordering
//!
//! Ids are placed into posting lists by binary insertion, so lists stay
//! sorted whatever order the corpus supplier uses. Ingesting in ascending id
//! order degenerates to plain appends.

use crate::engine::SearchEngine;
use crate::intersect::intersect_sorted;
use crate::tokenizer::{token_set, tokenize_unique};
use parking_lot::RwLock;
use sift_core::DocId;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// PostingList
// ============================================================================

/// Document ids containing a token, ascending, without duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingList<D> {
    ids: Vec<D>,
}

impl<D> Default for PostingList<D> {
    fn default() -> Self {
        PostingList { ids: Vec::new() }
    }
}

impl<D: Ord> PostingList<D> {
    /// Create a new empty posting list
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id at its sorted position.
    ///
    /// Returns false (and leaves the list unchanged) if the id is already present.
    pub fn insert(&mut self, id: D) -> bool {
        // Fast path for ascending ingestion.
        match self.ids.last() {
            None => {
                self.ids.push(id);
                return true;
            }
            Some(last) if *last < id => {
                self.ids.push(id);
                return true;
            }
            Some(_) => {}
        }
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.ids.insert(pos, id);
                true
            }
        }
    }

    /// Check whether an id is in the list
    pub fn contains(&self, id: &D) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Number of documents containing this token
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if posting list is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The ids, ascending
    pub fn as_slice(&self) -> &[D] {
        &self.ids
    }
}

impl<D> AsRef<[D]> for PostingList<D> {
    fn as_ref(&self) -> &[D] {
        &self.ids
    }
}

// ============================================================================
// InvertedIndex
// ============================================================================

#[derive(Debug)]
struct IndexInner<D> {
    postings: HashMap<String, PostingList<D>>,
    documents: BTreeSet<D>,
}

/// Inverted index mapping tokens to posting lists
///
/// # Thread Safety
///
/// Postings sit behind a `parking_lot::RwLock`: queries share read access,
/// ingestion takes the write lock for the duration of one document.
///
/// # Version Watermark
///
/// The version field tracks index state. It is incremented by every
/// `process_document` call that changes a posting list, so re-ingesting an
/// already indexed (id, text) pair leaves it untouched.
#[derive(Debug)]
pub struct InvertedIndex<D> {
    inner: RwLock<IndexInner<D>>,
    version: AtomicU64,
}

impl<D: DocId> Default for InvertedIndex<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DocId> InvertedIndex<D> {
    /// Create a new empty index
    pub fn new() -> Self {
        InvertedIndex {
            inner: RwLock::new(IndexInner {
                postings: HashMap::new(),
                documents: BTreeSet::new(),
            }),
            version: AtomicU64::new(0),
        }
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Get current version
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Number of distinct document ids ingested
    pub fn total_docs(&self) -> usize {
        self.inner.read().documents.len()
    }

    /// Number of distinct tokens in the index
    pub fn token_count(&self) -> usize {
        self.inner.read().postings.len()
    }

    /// Check whether a token has a posting list
    pub fn contains_token(&self, token: &str) -> bool {
        self.inner.read().postings.contains_key(token)
    }

    /// Copy of the posting list for a token, ascending
    ///
    /// Returns None if the token was never seen.
    pub fn postings(&self, token: &str) -> Option<Vec<D>> {
        self.inner
            .read()
            .postings
            .get(token)
            .map(|list| list.as_slice().to_vec())
    }

    /// Get all tokens in the index
    pub fn terms(&self) -> Vec<String> {
        self.inner.read().postings.keys().cloned().collect()
    }

    /// Clear all index data
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.postings.clear();
        inner.documents.clear();
        self.version.fetch_add(1, Ordering::Release);
    }

    // ========================================================================
    // Index Updates
    // ========================================================================

    /// Index a document
    ///
    /// Adds `id` to the posting list of every distinct token in `text`.
    /// An id already present in a list is not added again.
    pub fn index_document(&self, id: D, text: &str) {
        let tokens = token_set(text);

        let mut inner = self.inner.write();
        let mut changed = false;
        for token in tokens {
            changed |= inner.postings.entry(token).or_default().insert(id.clone());
        }
        let new_doc = inner.documents.insert(id);
        drop(inner);

        if changed || new_doc {
            self.version.fetch_add(1, Ordering::Release);
        }
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Ids of the documents containing every token of `query`, ascending
    ///
    /// Returns an empty vector as soon as one query token is unknown, and for
    /// queries without any token.
    pub fn find_all(&self, query: &str) -> Vec<D> {
        let tokens = tokenize_unique(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let inner = self.inner.read();
        let mut lists: Vec<&[D]> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            match inner.postings.get(token) {
                Some(list) => lists.push(list.as_slice()),
                None => {
                    tracing::trace!(target: "sift::index", token = %token, "Query token not indexed");
                    return Vec::new();
                }
            }
        }

        intersect_sorted(&lists)
    }
}

impl<D: DocId> SearchEngine for InvertedIndex<D> {
    type Id = D;

    fn process_document(&self, id: D, text: &str) {
        self.index_document(id, text);
    }

    fn search(&self, query: &str) -> Vec<D> {
        self.find_all(query)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::BagOfWordsEngine;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn sample_index() -> InvertedIndex<u32> {
        let index = InvertedIndex::new();
        index.process_document(1, "the cat sat");
        index.process_document(2, "the dog sat");
        index.process_document(3, "cats and dogs");
        index
    }

    #[test]
    fn test_search_single_tokens() {
        let index = sample_index();
        assert_eq!(index.search("the"), vec![1, 2]);
        assert_eq!(index.search("cat"), vec![1]);
        assert_eq!(index.search("sat"), vec![1, 2]);
        assert_eq!(index.search("dogs"), vec![3]);
    }

    #[test]
    fn test_search_conjunction() {
        let index = sample_index();
        assert_eq!(index.search("the sat"), vec![1, 2]);
        assert_eq!(index.search("the cat"), vec![1]);
        assert_eq!(index.search("cat dog"), Vec::<u32>::new());
    }

    #[test]
    fn test_search_normalizes_query() {
        let index = sample_index();
        assert_eq!(index.search("  THE, sat!! the "), vec![1, 2]);
    }

    #[test]
    fn test_search_nonexistent() {
        let index = sample_index();
        assert!(index.search("nonexistent").is_empty());
    }

    #[test]
    fn test_missing_token_short_circuits() {
        let index = sample_index();
        // "the" alone matches two documents
        assert!(index.search("the nonexistent").is_empty());
    }

    #[test]
    fn test_empty_query() {
        let index = sample_index();
        assert!(index.search("").is_empty());
        assert!(index.search("?!").is_empty());
    }

    #[test]
    fn test_every_document_is_recorded() {
        let index = sample_index();
        // Later documents sharing a token are appended, not dropped.
        assert_eq!(index.postings("sat"), Some(vec![1, 2]));
        assert_eq!(index.postings("the"), Some(vec![1, 2]));
    }

    #[test]
    fn test_reingestion_is_idempotent() {
        let index = sample_index();
        let v1 = index.version();

        index.process_document(2, "the dog sat");

        assert_eq!(index.postings("the"), Some(vec![1, 2]));
        assert_eq!(index.postings("dog"), Some(vec![2]));
        assert_eq!(index.total_docs(), 3);
        assert_eq!(index.version(), v1);
    }

    #[test]
    fn test_out_of_order_ingestion_stays_sorted() {
        let index = InvertedIndex::new();
        index.process_document(5u32, "alpha beta");
        index.process_document(1, "alpha");
        index.process_document(3, "alpha beta");
        index.process_document(2, "beta");

        assert_eq!(index.postings("alpha"), Some(vec![1, 3, 5]));
        assert_eq!(index.postings("beta"), Some(vec![2, 3, 5]));
        assert_eq!(index.search("alpha beta"), vec![3, 5]);
    }

    #[test]
    fn test_path_identifiers() {
        use std::path::PathBuf;

        let index = InvertedIndex::new();
        index.process_document(PathBuf::from("file2search/2.txt"), "hello there");
        index.process_document(PathBuf::from("file2search/1.txt"), "hello world");

        assert_eq!(
            index.search("hello"),
            vec![
                PathBuf::from("file2search/1.txt"),
                PathBuf::from("file2search/2.txt")
            ]
        );
    }

    #[test]
    fn test_statistics() {
        let index = sample_index();
        assert_eq!(index.total_docs(), 3);
        // the cat sat dog cats and dogs
        assert_eq!(index.token_count(), 7);
        assert!(index.contains_token("cats"));
        assert!(!index.contains_token("bird"));

        let mut terms = index.terms();
        terms.sort();
        assert_eq!(terms, vec!["and", "cat", "cats", "dog", "dogs", "sat", "the"]);
    }

    #[test]
    fn test_empty_document_counts_but_adds_no_postings() {
        let index = InvertedIndex::new();
        index.process_document(1u32, "");
        assert_eq!(index.total_docs(), 1);
        assert_eq!(index.token_count(), 0);
    }

    #[test]
    fn test_version_increment() {
        let index = InvertedIndex::new();
        let v0 = index.version();

        index.process_document(1u32, "hello");
        let v1 = index.version();

        index.process_document(2, "hello");
        let v2 = index.version();

        assert!(v1 > v0);
        assert!(v2 > v1);
    }

    #[test]
    fn test_clear() {
        let index = sample_index();
        let v1 = index.version();
        index.clear();

        assert_eq!(index.total_docs(), 0);
        assert!(index.postings("the").is_none());
        assert!(index.search("the").is_empty());
        assert!(index.version() > v1);
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        use std::sync::Arc;
        use std::thread;

        let index = Arc::new(InvertedIndex::new());
        let writer = {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                for i in 0..200u32 {
                    index.process_document(i, "common word");
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let index = Arc::clone(&index);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let hits = index.search("common word");
                        assert!(hits.windows(2).all(|w| w[0] < w[1]));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(index.search("common word").len(), 200);
    }

    #[test]
    fn test_posting_list() {
        let mut list = PostingList::new();
        assert!(list.is_empty());

        assert!(list.insert(3u32));
        assert!(list.insert(1));
        assert!(list.insert(2));
        assert!(!list.insert(2));

        assert_eq!(list.len(), 3);
        assert_eq!(list.as_slice(), &[1, 2, 3]);
        assert!(list.contains(&1));
        assert!(!list.contains(&4));
    }

    // Random corpora over a tiny vocabulary so conjunctions actually match.
    fn corpus() -> impl Strategy<Value = BTreeMap<u16, Vec<usize>>> {
        proptest::collection::btree_map(
            0u16..500,
            proptest::collection::vec(0usize..6, 0..5),
            0..40,
        )
    }

    const VOCAB: [&str; 6] = ["red", "green", "blue", "cyan", "pink", "gray"];

    proptest! {
        #[test]
        fn prop_search_matches_brute_force(
            docs in corpus(),
            query in proptest::collection::vec(0usize..6, 1..4),
        ) {
            let index = InvertedIndex::new();
            let reference = BagOfWordsEngine::new();
            // Descending ids exercise binary insertion.
            for (id, words) in docs.iter().rev() {
                let text: Vec<&str> = words.iter().map(|w| VOCAB[*w]).collect();
                let text = text.join(" ");
                index.process_document(*id, &text);
                reference.process_document(*id, &text);
            }

            let query: Vec<&str> = query.iter().map(|w| VOCAB[*w]).collect();
            let query = query.join(" ");

            let hits = index.search(&query);
            prop_assert!(hits.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(hits, reference.search(&query));
        }
    }
}
