//! Context assembly from ranked search results.

use crate::models::SearchResult;

/// Join ranked results into a single context block.
///
/// Each result becomes `"[Documento {n}]: {title}\n{chunk}"` with `n`
/// starting at 1. Blocks are separated by a blank line. No results yield
/// an empty string.
pub fn generate_context_from_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "[Documento {}]: {}\n{}",
                i + 1,
                r.document.title,
                r.relevant_chunk
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
