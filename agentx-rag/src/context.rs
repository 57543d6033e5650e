//! Context assembly for prompt construction.

use crate::document::RetrievalHit;

/// Concatenate hit texts in retrieval order, separated by blank lines.
///
/// A pure pass-through: no deduplication, truncation, or re-ranking, so the
/// context order always matches the sources order in the final result.
/// Returns an empty string for no hits.
pub fn assemble_context(hits: &[RetrievalHit]) -> String {
    hits.iter().map(|h| h.text.as_str()).collect::<Vec<_>>().join("\n\n")
}
