//! Simulated retrieval and generation.
//!
//! [`KeywordRetriever`] ranks an in-memory [`Store`] and [`TemplateGenerator`]
//! picks a canned answer. Both sleep for a configured delay first to stand
//! in for network and model latency.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use ragchat_core::context::generate_context_from_results;
use ragchat_core::models::Message;
use ragchat_core::respond::{matching_rule, select_response};
use ragchat_core::search::{search_documents, SearchParams};
use ragchat_core::store::Store;

use crate::config::Config;
use crate::traits::{DocumentRetriever, ResponseGenerator, Retrieval};

/// Keyword ranking over a shared store.
pub struct KeywordRetriever {
    store: Arc<dyn Store>,
    params: SearchParams,
    delay: Duration,
}

impl KeywordRetriever {
    pub fn new(store: Arc<dyn Store>, params: SearchParams, delay: Duration) -> Self {
        Self {
            store,
            params,
            delay,
        }
    }
}

#[async_trait]
impl DocumentRetriever for KeywordRetriever {
    async fn retrieve(&self, query: &str) -> Result<Retrieval> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let results = search_documents(self.store.as_ref(), query, &self.params);
        let context = generate_context_from_results(&results);
        debug!(
            results = results.len(),
            context_chars = context.chars().count(),
            "retrieved documents"
        );

        Ok(Retrieval { results, context })
    }
}

/// Canned-template answers.
pub struct TemplateGenerator {
    delay: Duration,
}

impl TemplateGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ResponseGenerator for TemplateGenerator {
    async fn generate(
        &self,
        query: &str,
        retrieval: &Retrieval,
        history: &[Message],
    ) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let rule = if retrieval.results.is_empty() {
            "fallback"
        } else {
            matching_rule(query).map(|r| r.name).unwrap_or("generic")
        };
        debug!(rule, history = history.len(), "selected response");

        Ok(select_response(query, &retrieval.context, &retrieval.results))
    }
}

/// Build the simulated retriever and generator from config.
pub fn simulated_pipeline(
    store: Arc<dyn Store>,
    config: &Config,
) -> (Arc<dyn DocumentRetriever>, Arc<dyn ResponseGenerator>) {
    let retriever = KeywordRetriever::new(
        store,
        config.retrieval.search_params(),
        config.chat.retrieval_delay(),
    );
    let generator = TemplateGenerator::new(config.chat.generation_delay());
    (Arc::new(retriever), Arc::new(generator))
}
