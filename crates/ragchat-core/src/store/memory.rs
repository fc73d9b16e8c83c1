//! In-memory [`Store`] implementation.
//!
//! Documents live in a `Vec<Arc<Document>>` fixed at construction time.
//! There is no index; the ranker does a linear scan.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{bail, Result};

use crate::models::Document;

use super::Store;

/// Immutable in-memory document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    docs: Vec<Arc<Document>>,
}

impl InMemoryStore {
    /// Build a store from documents, keeping their order.
    ///
    /// Fails if two documents share an ID.
    pub fn new(docs: Vec<Document>) -> Result<Self> {
        let mut seen = HashSet::new();
        for doc in &docs {
            if !seen.insert(doc.id.as_str()) {
                bail!("duplicate document id: {}", doc.id);
            }
        }
        Ok(Self::from_unique(docs))
    }

    /// Caller guarantees the IDs are unique.
    pub(crate) fn from_unique(docs: Vec<Document>) -> Self {
        Self {
            docs: docs.into_iter().map(Arc::new).collect(),
        }
    }
}

impl Store for InMemoryStore {
    fn documents(&self) -> &[Arc<Document>] {
        &self.docs
    }
}
