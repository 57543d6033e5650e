//! Source attribution: map retrieval hits to human-readable provenance.

use crate::document::{RetrievalHit, SourceAttribution};

/// Derive one [`SourceAttribution`] per hit, in hit order.
///
/// `relevance_score = 1 - distance`, unclamped. Depending on the index's
/// metric the score can be negative or exceed 1; that is a documented
/// characteristic, not a bug. Callers wanting `[0, 1]` must clamp.
pub fn attribute(hits: &[RetrievalHit]) -> Vec<SourceAttribution> {
    hits.iter()
        .map(|hit| SourceAttribution {
            source: hit.metadata.source.clone(),
            chunk_id: hit.metadata.chunk_index,
            relevance_score: 1.0 - hit.distance,
        })
        .collect()
}
