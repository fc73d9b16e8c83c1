//! Document store abstraction for ragchat.
//!
//! The [`Store`] trait is the read-only data source the ranker scans.
//! Stores are built once and never mutated, so any number of concurrent
//! searches can share one instance.
//!
//! Implementations must be `Send + Sync` to be shared across async tasks.

pub mod knowledge;
pub mod memory;

use std::sync::Arc;

use crate::models::Document;

/// Immutable, ordered collection of documents.
///
/// Store order is significant: it is the ranker's tie-break.
pub trait Store: Send + Sync {
    /// All documents, in store order.
    fn documents(&self) -> &[Arc<Document>];

    /// Look up a document by ID.
    fn get(&self, id: &str) -> Option<&Arc<Document>> {
        self.documents().iter().find(|d| d.id == id)
    }

    fn len(&self) -> usize {
        self.documents().len()
    }

    fn is_empty(&self) -> bool {
        self.documents().is_empty()
    }
}
