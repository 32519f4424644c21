//! LRU query cache and the caching engine decorator
//!
//! Repeated identical queries dominate real traffic, so results are cached
//! per raw query string. Two queries that tokenize identically but differ in
//! spelling ("the cat" vs "Cat, the") are distinct entries.
//!
//! Recency is tracked by the `lru` crate (hash map + intrusive linked list),
//! so `has`, `get` and `set` are O(1).

use crate::engine::SearchEngine;
use lru::LruCache;
use parking_lot::Mutex;
use sift_core::{Error, Result, DEFAULT_CACHE_CAPACITY};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CACHE_CAPACITY) {
    Some(capacity) => capacity,
    None => panic!("default cache capacity must be non-zero"),
};

// ============================================================================
// QueryCache
// ============================================================================

/// Fixed-capacity least-recently-used map from raw query to value
///
/// Both `get` and `set` count as use. `has` does not touch recency.
#[derive(Debug)]
pub struct QueryCache<V> {
    entries: LruCache<String, V>,
    evictions: u64,
}

impl<V> QueryCache<V> {
    /// Create a cache holding at most `capacity` entries
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| Error::invalid_input("cache capacity must be greater than zero"))?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create a cache from an already validated capacity
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        QueryCache {
            entries: LruCache::new(capacity),
            evictions: 0,
        }
    }

    /// Check whether `key` is cached, without marking it as used
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Look up `key` and mark it most recently used
    pub fn get(&mut self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Insert or update `key` and mark it most recently used
    ///
    /// Inserting a new key into a full cache evicts the least recently used entry.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let existed = self.entries.contains(&key);
        if let Some((evicted, _)) = self.entries.push(key, value) {
            if !existed {
                self.evictions += 1;
                tracing::trace!(target: "sift::cache", query = %evicted, "Evicted cached query");
            }
        }
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Number of entries evicted by capacity pressure so far
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ============================================================================
// CacheStats
// ============================================================================

/// Snapshot of cache activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Queries answered from the cache
    pub hits: u64,
    /// Queries forwarded to the wrapped engine
    pub misses: u64,
    /// Entries dropped by capacity pressure
    pub evictions: u64,
    /// Entries currently cached
    pub len: usize,
    /// Configured capacity
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of queries served from the cache, 0.0 when nothing was queried
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

// ============================================================================
// CachedEngine
// ============================================================================

#[derive(Debug)]
struct CacheSlot<V> {
    cache: QueryCache<V>,
    // Bumped whenever ingestion invalidates the cache.
    generation: u64,
}

/// Decorator that puts a `QueryCache` in front of any engine
///
/// On a hit the wrapped engine is not consulted at all. On a miss the result
/// is computed without holding the cache lock, then stored under the raw
/// query string. Ingesting through the decorator empties the cache, and a
/// result computed before such an ingestion is never stored.
#[derive(Debug)]
pub struct CachedEngine<E: SearchEngine> {
    engine: E,
    slot: Mutex<CacheSlot<Vec<E::Id>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<E: SearchEngine> CachedEngine<E> {
    /// Wrap `engine` with a cache of the default capacity (32)
    pub fn new(engine: E) -> Self {
        Self::from_parts(engine, QueryCache::with_capacity(DEFAULT_CAPACITY))
    }

    /// Wrap `engine` with a cache holding at most `capacity` queries
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `capacity` is zero.
    pub fn with_capacity(engine: E, capacity: usize) -> Result<Self> {
        Ok(Self::from_parts(engine, QueryCache::new(capacity)?))
    }

    fn from_parts(engine: E, cache: QueryCache<Vec<E::Id>>) -> Self {
        CachedEngine {
            engine,
            slot: Mutex::new(CacheSlot {
                cache,
                generation: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The wrapped engine
    pub fn inner(&self) -> &E {
        &self.engine
    }

    /// Unwrap, discarding the cache
    pub fn into_inner(self) -> E {
        self.engine
    }

    /// Check whether a raw query string is currently cached
    pub fn is_cached(&self, query: &str) -> bool {
        self.slot.lock().cache.has(query)
    }

    /// Drop every cached result
    pub fn clear_cache(&self) {
        let mut slot = self.slot.lock();
        slot.cache.clear();
        slot.generation += 1;
    }

    /// Current cache statistics
    pub fn stats(&self) -> CacheStats {
        let slot = self.slot.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: slot.cache.evictions(),
            len: slot.cache.len(),
            capacity: slot.cache.capacity(),
        }
    }
}

impl<E: SearchEngine> SearchEngine for CachedEngine<E> {
    type Id = E::Id;

    fn process_document(&self, id: Self::Id, text: &str) {
        self.engine.process_document(id, text);
        self.clear_cache();
    }

    fn search(&self, query: &str) -> Vec<Self::Id> {
        let generation = {
            let mut slot = self.slot.lock();
            if let Some(hit) = slot.cache.get(query) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(target: "sift::cache", query = %query, "Cache hit");
                return hit.clone();
            }
            slot.generation
        };

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = self.engine.search(query);

        let mut slot = self.slot.lock();
        if slot.generation == generation {
            slot.cache.set(query, result.clone());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::InvertedIndex;
    use std::sync::atomic::AtomicUsize;

    /// Engine wrapper counting how often the index is actually searched
    struct CountingEngine {
        index: InvertedIndex<u32>,
        searches: AtomicUsize,
    }

    impl CountingEngine {
        fn new() -> Self {
            CountingEngine {
                index: InvertedIndex::new(),
                searches: AtomicUsize::new(0),
            }
        }

        fn searches(&self) -> usize {
            self.searches.load(Ordering::SeqCst)
        }
    }

    impl SearchEngine for CountingEngine {
        type Id = u32;

        fn process_document(&self, id: u32, text: &str) {
            self.index.process_document(id, text);
        }

        fn search(&self, query: &str) -> Vec<u32> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            self.index.search(query)
        }
    }

    fn cached(capacity: usize) -> CachedEngine<CountingEngine> {
        let engine = CachedEngine::with_capacity(CountingEngine::new(), capacity).unwrap();
        engine.process_document(1, "the cat sat");
        engine.process_document(2, "the dog sat");
        engine.process_document(3, "cats and dogs");
        engine
    }

    // ------------------------------------------------------------------------
    // QueryCache
    // ------------------------------------------------------------------------

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            QueryCache::<u32>::new(0),
            Err(Error::InvalidInput(_))
        ));
        assert!(CachedEngine::with_capacity(InvertedIndex::<u32>::new(), 0).is_err());
    }

    #[test]
    fn test_has_get_set() {
        let mut cache = QueryCache::new(2).unwrap();
        assert!(!cache.has("a"));
        assert!(cache.get("a").is_none());

        cache.set("a", 1);
        assert!(cache.has("a"));
        assert_eq!(cache.get("a"), Some(&1));

        cache.set("a", 2);
        assert_eq!(cache.get("a"), Some(&2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.capacity(), 2);
    }

    #[test]
    fn test_evicts_least_recently_set() {
        let mut cache = QueryCache::new(2).unwrap();
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        assert!(!cache.has("a"));
        assert!(cache.has("b"));
        assert!(cache.has("c"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.evictions(), 1);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = QueryCache::new(2).unwrap();
        cache.set("a", 1);
        cache.set("b", 2);
        cache.get("a");
        cache.set("c", 3);

        assert!(cache.has("a"));
        assert!(!cache.has("b"));
    }

    #[test]
    fn test_update_refreshes_recency_without_eviction() {
        let mut cache = QueryCache::new(2).unwrap();
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 10);
        assert_eq!(cache.evictions(), 0);

        cache.set("c", 3);
        assert!(cache.has("a"));
        assert!(!cache.has("b"));
    }

    #[test]
    fn test_has_does_not_refresh_recency() {
        let mut cache = QueryCache::new(2).unwrap();
        cache.set("a", 1);
        cache.set("b", 2);
        assert!(cache.has("a"));
        cache.set("c", 3);

        assert!(!cache.has("a"));
    }

    #[test]
    fn test_clear() {
        let mut cache = QueryCache::new(4).unwrap();
        cache.set("a", 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    // ------------------------------------------------------------------------
    // CachedEngine
    // ------------------------------------------------------------------------

    #[test]
    fn test_hit_skips_engine() {
        let engine = cached(4);

        let first = engine.search("the sat");
        assert_eq!(engine.inner().searches(), 1);

        let second = engine.search("the sat");
        assert_eq!(first, second);
        assert_eq!(first, vec![1, 2]);
        assert_eq!(engine.inner().searches(), 1);

        let stats = engine.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_keyed_by_raw_query() {
        let engine = cached(4);
        assert_eq!(engine.search("the cat"), vec![1]);
        assert_eq!(engine.search("Cat, the"), vec![1]);

        assert_eq!(engine.inner().searches(), 2);
        assert!(engine.is_cached("the cat"));
        assert!(engine.is_cached("Cat, the"));
        assert_eq!(engine.stats().len, 2);
    }

    #[test]
    fn test_empty_results_are_cached() {
        let engine = cached(4);
        assert!(engine.search("nonexistent").is_empty());
        assert!(engine.search("nonexistent").is_empty());
        assert_eq!(engine.inner().searches(), 1);
    }

    #[test]
    fn test_eviction_recomputes() {
        let engine = cached(2);
        engine.search("the");
        engine.search("sat");
        engine.search("the"); // hit, "sat" becomes least recently used
        engine.search("cat"); // evicts "sat"
        assert_eq!(engine.inner().searches(), 3);
        assert!(!engine.is_cached("sat"));
        assert_eq!(engine.stats().evictions, 1);

        assert_eq!(engine.search("sat"), vec![1, 2]);
        assert_eq!(engine.inner().searches(), 4);
        assert_eq!(engine.stats().len, 2);
    }

    #[test]
    fn test_ingestion_invalidates() {
        let engine = cached(4);
        assert_eq!(engine.search("dogs"), vec![3]);

        engine.process_document(4, "dogs everywhere");
        assert!(!engine.is_cached("dogs"));
        assert_eq!(engine.search("dogs"), vec![3, 4]);
        assert_eq!(engine.inner().searches(), 2);
    }

    #[test]
    fn test_default_capacity() {
        let engine = CachedEngine::new(InvertedIndex::<u32>::new());
        let expected = CacheStats {
            capacity: 32,
            ..CacheStats::default()
        };
        assert_eq!(engine.stats(), expected);
    }

    #[test]
    fn test_into_inner() {
        let engine = cached(2);
        let counting = engine.into_inner();
        assert_eq!(counting.search("cats"), vec![3]);
    }
}
