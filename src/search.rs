//! `ragchat search` and `ragchat docs`.
//!
//! Thin CLI wrappers around the core ranker that print either a
//! human-readable listing or JSON.

use anyhow::{bail, Result};
use serde::Serialize;

use ragchat_core::models::SearchResult;
use ragchat_core::search::{explain_score, search_documents, ScoreBreakdown, SearchParams};
use ragchat_core::store::knowledge::react_knowledge_base;
use ragchat_core::store::Store;

use crate::config::Config;

/// JSON shape of one ranked result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub source: String,
    pub score: f64,
    pub chunk: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<ScoreBreakdown>,
}

impl SearchResultItem {
    fn from_result(result: &SearchResult, query: &str, explain: bool) -> Self {
        Self {
            id: result.document.id.clone(),
            title: result.document.title.clone(),
            source: result.document.metadata.source.clone(),
            score: result.score,
            chunk: result.relevant_chunk.clone(),
            explain: explain.then(|| explain_score(&result.document, query)),
        }
    }
}

/// Options for [`run_search`] that override config.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub limit: Option<usize>,
    pub threshold: Option<f64>,
    pub explain: bool,
    pub json: bool,
}

/// Rank the built-in knowledge base against `query`.
pub fn search_items(
    config: &Config,
    query: &str,
    opts: &SearchOptions,
) -> Result<Vec<SearchResultItem>> {
    let mut params: SearchParams = config.retrieval.search_params();
    if let Some(limit) = opts.limit {
        if limit < 1 {
            bail!("--limit must be >= 1");
        }
        params.k = limit;
    }
    if let Some(threshold) = opts.threshold {
        if !threshold.is_finite() || threshold < 0.0 {
            bail!("--threshold must be a finite number >= 0.0");
        }
        params.score_threshold = threshold;
    }

    let store = react_knowledge_base();
    Ok(search_documents(&store, query, &params)
        .iter()
        .map(|r| SearchResultItem::from_result(r, query, opts.explain))
        .collect())
}

pub fn run_search(config: &Config, query: &str, opts: &SearchOptions) -> Result<()> {
    let items = search_items(config, query, opts)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, item) in items.iter().enumerate() {
        println!("{}. [{:.2}] {}", i + 1, item.score, item.title);
        println!("    source: {}  id: {}", item.source, item.id);
        println!("    {}", item.chunk);
        if let Some(b) = &item.explain {
            println!(
                "    explain: title={:.1} react={:.1} component={:.1} content={:.1}",
                b.title_query, b.title_react, b.title_component, b.content_query
            );
            println!(
                "             memo={:.1} button={:.1} hook={:.1}",
                b.memo, b.button, b.hook
            );
        }
        println!();
    }

    Ok(())
}

/// List the knowledge base.
pub fn run_docs(json: bool) -> Result<()> {
    let store = react_knowledge_base();

    if json {
        let docs: Vec<_> = store.documents().iter().map(|d| d.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }

    println!(
        "{:<4} {:<36} {:<20} {:<5} CREATED",
        "ID", "TITLE", "SOURCE", "TYPE"
    );
    for doc in store.documents() {
        println!(
            "{:<4} {:<36} {:<20} {:<5} {}",
            doc.id,
            doc.title,
            doc.metadata.source,
            doc.metadata.doc_type.to_string(),
            doc.metadata.created.format("%Y-%m-%d")
        );
    }

    Ok(())
}
