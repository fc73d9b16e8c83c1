//! Keyword ranker over a [`Store`].
//!
//! Scoring is a sum of independent substring bonuses. It is not a
//! normalized similarity; scores above `1.0` are normal.
//!
//! # Scoring Algorithm
//!
//! For each document, with query, title and content lower-cased:
//!
//! | Condition | Bonus |
//! |-----------|-------|
//! | title contains the query | `0.8` |
//! | title contains `"react"` | `0.3` |
//! | title contains `"component"` | `0.3` |
//! | content contains the query | `0.6` |
//! | content contains `"usememo"` and query contains `"memo"` | `0.7` |
//! | content contains `"button"` and query contains `"button"` | `0.7` |
//! | content contains `"hook"` and query contains `"hook"` | `0.5` |
//!
//! Then:
//!
//! 1. Keep documents with `score >= score_threshold`.
//! 2. Sort by score (desc). Ties keep store order.
//! 3. Truncate to `k`.

use serde::Serialize;

use crate::models::{Document, SearchResult};
use crate::store::Store;

const TITLE_QUERY_BONUS: f64 = 0.8;
const TITLE_REACT_BONUS: f64 = 0.3;
const TITLE_COMPONENT_BONUS: f64 = 0.3;
const CONTENT_QUERY_BONUS: f64 = 0.6;
const MEMO_BONUS: f64 = 0.7;
const BUTTON_BONUS: f64 = 0.7;
const HOOK_BONUS: f64 = 0.5;

/// Characters kept when a document has no non-blank line.
const FALLBACK_CHUNK_CHARS: usize = 200;

/// Ranking parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Maximum results to return.
    pub k: usize,
    /// Minimum score a document needs to be returned.
    pub score_threshold: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            k: 6,
            score_threshold: 0.2,
        }
    }
}

/// Per-bonus scoring breakdown for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub title_query: f64,
    pub title_react: f64,
    pub title_component: f64,
    pub content_query: f64,
    pub memo: f64,
    pub button: f64,
    pub hook: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.title_query
            + self.title_react
            + self.title_component
            + self.content_query
            + self.memo
            + self.button
            + self.hook
    }
}

fn bonus(hit: bool, value: f64) -> f64 {
    if hit {
        value
    } else {
        0.0
    }
}

/// Score one document against a query.
///
/// `query` is lower-cased internally.
pub fn explain_score(doc: &Document, query: &str) -> ScoreBreakdown {
    let query = query.to_lowercase();
    let title = doc.title.to_lowercase();
    let content = doc.content.to_lowercase();

    ScoreBreakdown {
        title_query: bonus(title.contains(&query), TITLE_QUERY_BONUS),
        title_react: bonus(title.contains("react"), TITLE_REACT_BONUS),
        title_component: bonus(title.contains("component"), TITLE_COMPONENT_BONUS),
        content_query: bonus(content.contains(&query), CONTENT_QUERY_BONUS),
        memo: bonus(
            content.contains("usememo") && query.contains("memo"),
            MEMO_BONUS,
        ),
        button: bonus(
            content.contains("button") && query.contains("button"),
            BUTTON_BONUS,
        ),
        hook: bonus(
            content.contains("hook") && query.contains("hook"),
            HOOK_BONUS,
        ),
    }
}

/// Pick the line of `content` most relevant to `query`.
///
/// Returns the first non-blank line containing the (lower-cased) query,
/// else the first non-blank line, else the first 200 characters. The
/// result is trimmed.
pub fn relevant_chunk(content: &str, query: &str) -> String {
    let query = query.to_lowercase();
    let mut lines = content.split('\n').filter(|l| !l.trim().is_empty());

    let first = match lines.next() {
        Some(line) => line,
        None => {
            let prefix: String = content.chars().take(FALLBACK_CHUNK_CHARS).collect();
            return prefix.trim().to_string();
        }
    };

    std::iter::once(first)
        .chain(lines)
        .find(|l| l.to_lowercase().contains(&query))
        .unwrap_or(first)
        .trim()
        .to_string()
}

/// Rank the documents of `store` against `query`.
///
/// This is the single ranking entry point used by the chat pipeline, the
/// CLI, and the evaluation harness. Results are drawn only from `store`.
pub fn search_documents<S: Store + ?Sized>(
    store: &S,
    query: &str,
    params: &SearchParams,
) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = store
        .documents()
        .iter()
        .map(|doc| SearchResult {
            document: doc.clone(),
            score: explain_score(doc, query).total(),
            relevant_chunk: relevant_chunk(&doc.content, query),
        })
        .filter(|r| r.score >= params.score_threshold)
        .collect();

    // `sort_by` is stable, so equal scores keep store order.
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(params.k);
    results
}
