//! Document identity and the (id, text) pair supplied by corpus loaders

use std::fmt::Debug;

/// Bound for document identifiers
///
/// Identifiers are opaque to the engine. The only requirement is a total
/// order, because posting lists are kept sorted and intersected by merging.
/// File paths, integers and strings all qualify.
pub trait DocId: Ord + Clone + Debug + Send + Sync + 'static {}

impl<T> DocId for T where T: Ord + Clone + Debug + Send + Sync + 'static {}

/// A single document handed to an engine for ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<D> {
    /// Unique identifier, assigned by the supplier
    pub id: D,
    /// Raw document text
    pub text: String,
}

impl<D> Document<D> {
    /// Create a new document
    pub fn new(id: D, text: impl Into<String>) -> Self {
        Document {
            id,
            text: text.into(),
        }
    }
}
