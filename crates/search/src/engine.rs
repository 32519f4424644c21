//! The searchable-corpus capability shared by every engine
//!
//! An engine has two halves: an indexer (`process_document`) and a retriever
//! (`search`). Concrete strategies implement both; decorators such as
//! [`CachedEngine`](crate::cache::CachedEngine) wrap any of them.

use sift_core::{DocId, Document, Result};
use std::sync::Arc;

/// Trait for engines that ingest documents and answer conjunctive queries
///
/// Both methods take `&self`. Implementations guard their state with a
/// reader-writer lock, so one engine can be shared between an ingesting
/// thread and any number of querying threads.
pub trait SearchEngine: Send + Sync {
    /// Document identifier type
    type Id: DocId;

    /// Index one document under `id`.
    fn process_document(&self, id: Self::Id, text: &str);

    /// Return the matching identifiers in ascending order.
    ///
    /// A query with no match returns an empty vector; it is never an error.
    fn search(&self, query: &str) -> Vec<Self::Id>;

    /// Index a document produced by a corpus supplier.
    fn add_document(&self, doc: Document<Self::Id>) {
        self.process_document(doc.id, &doc.text);
    }

    /// Index every document of a corpus supplier, in the supplier's order.
    ///
    /// Stops at the first supplier error. Returns the number of documents
    /// ingested.
    fn ingest<I>(&self, corpus: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<Document<Self::Id>>>,
        Self: Sized,
    {
        let mut count = 0;
        for doc in corpus {
            self.add_document(doc?);
            count += 1;
        }
        tracing::info!(target: "sift::engine", documents = count, "Corpus ingested");
        Ok(count)
    }
}

impl<E: SearchEngine + ?Sized> SearchEngine for Box<E> {
    type Id = E::Id;

    fn process_document(&self, id: Self::Id, text: &str) {
        (**self).process_document(id, text)
    }

    fn search(&self, query: &str) -> Vec<Self::Id> {
        (**self).search(query)
    }
}

impl<E: SearchEngine + ?Sized> SearchEngine for Arc<E> {
    type Id = E::Id;

    fn process_document(&self, id: Self::Id, text: &str) {
        (**self).process_document(id, text)
    }

    fn search(&self, query: &str) -> Vec<Self::Id> {
        (**self).search(query)
    }
}

/// A type-erased engine, for choosing a strategy at runtime
pub type DynEngine<D> = Box<dyn SearchEngine<Id = D>>;
