//! Session wrapper around the loaded engine.
//!
//! Resolves the configuration from file and flags, builds the configured
//! strategy, optionally wraps it in the query cache, and ingests the corpus.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use sift_core::{DirectoryCorpus, EngineKind, Result, SiftConfig, CONFIG_FILE_NAME};
use sift_search::{build_engine, CacheStats, CachedEngine, DynEngine, SearchEngine};

/// The engine behind a session, cached or not.
pub enum Backend {
    /// Engine wrapped in the LRU query cache
    Cached(CachedEngine<DynEngine<PathBuf>>),
    /// Engine queried directly
    Plain(DynEngine<PathBuf>),
}

/// A loaded corpus ready to answer queries.
pub struct SessionState {
    backend: Backend,
    kind: EngineKind,
    documents: usize,
}

impl SessionState {
    /// Build the engine described by `config` and ingest its corpus.
    pub fn open(config: &SiftConfig) -> Result<Self> {
        config.validate()?;
        let kind = config.engine_kind()?;

        let engine = build_engine::<PathBuf>(kind);
        let backend = if config.cache {
            Backend::Cached(CachedEngine::with_capacity(engine, config.cache_capacity)?)
        } else {
            Backend::Plain(engine)
        };

        let corpus = DirectoryCorpus::from_config(config)?;
        let documents = match &backend {
            Backend::Cached(engine) => engine.ingest(corpus)?,
            Backend::Plain(engine) => engine.ingest(corpus)?,
        };

        tracing::info!(
            target: "sift::cli",
            engine = kind.as_str(),
            cache = config.cache,
            documents,
            "Engine ready"
        );

        Ok(SessionState {
            backend,
            kind,
            documents,
        })
    }

    /// Run one query.
    pub fn search(&self, query: &str) -> Vec<PathBuf> {
        match &self.backend {
            Backend::Cached(engine) => engine.search(query),
            Backend::Plain(engine) => engine.search(query),
        }
    }

    /// Cache statistics, if the cache is enabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        match &self.backend {
            Backend::Cached(engine) => Some(engine.stats()),
            Backend::Plain(_) => None,
        }
    }

    /// Strategy in use.
    pub fn engine_kind(&self) -> EngineKind {
        self.kind
    }

    /// Number of documents ingested at startup.
    pub fn documents(&self) -> usize {
        self.documents
    }
}

/// Resolve the configuration: explicit `--config`, else `./sift.toml` if
/// present, else defaults. Command-line flags override file values.
pub fn load_config(matches: &ArgMatches) -> Result<SiftConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SiftConfig::from_file(Path::new(path))?,
        None => {
            let default_path = Path::new(CONFIG_FILE_NAME);
            if default_path.exists() {
                SiftConfig::from_file(default_path)?
            } else {
                SiftConfig::default()
            }
        }
    };

    if let Some(corpus) = matches.get_one::<String>("corpus") {
        config.corpus_dir = PathBuf::from(corpus);
        // An explicit directory means "everything in it".
        config.files = None;
    }
    if let Some(engine) = matches.get_one::<String>("engine") {
        config.engine = engine.clone();
    }
    if let Some(capacity) = matches.get_one::<usize>("cache-capacity") {
        config.cache_capacity = *capacity;
    }
    if matches.get_flag("no-cache") {
        config.cache = false;
    }

    config.validate()?;
    Ok(config)
}
