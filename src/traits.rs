//! Capability traits the chat controller calls through.
//!
//! The controller never ranks documents or picks templates itself. It
//! drives two capabilities:
//!
//! ```text
//! query ──▶ DocumentRetriever ──▶ Retrieval { results, context }
//!                                      │
//!                                      ▼
//!                              ResponseGenerator ──▶ answer
//! ```
//!
//! The shipped implementations live in [`crate::pipeline`]. Tests and
//! embedders can substitute their own, e.g. to inject failures.
//!
//! # Example
//!
//! ```rust
//! use anyhow::Result;
//! use async_trait::async_trait;
//! use ragchat::traits::{ResponseGenerator, Retrieval};
//! use ragchat_core::models::Message;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl ResponseGenerator for Echo {
//!     async fn generate(&self, query: &str, _r: &Retrieval, _h: &[Message]) -> Result<String> {
//!         Ok(query.to_string())
//!     }
//! }
//! ```

use anyhow::Result;
use async_trait::async_trait;

use ragchat_core::models::{Message, SearchResult};

/// Output of the retrieval step.
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    /// Ranked documents, best first.
    pub results: Vec<SearchResult>,
    /// Formatted context built from `results`.
    pub context: String,
}

/// Finds documents relevant to a query.
#[async_trait]
pub trait DocumentRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Retrieval>;
}

/// Produces the assistant's answer from a query and its retrieval.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// `history` holds the messages exchanged before `query`.
    async fn generate(
        &self,
        query: &str,
        retrieval: &Retrieval,
        history: &[Message],
    ) -> Result<String>;
}
