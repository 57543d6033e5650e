//! Vector store trait for persisting and searching embedded chunks.

use async_trait::async_trait;

use crate::document::{ChunkMetadata, IndexRecord, RetrievalHit};
use crate::error::Result;

/// A nearest-neighbor store over one named collection of [`IndexRecord`]s.
///
/// Stores report **distance** (lower is closer) in their own metric; the
/// bundled implementations use cosine distance (`1 - cosine similarity`).
/// Query results are ordered by nondecreasing distance. Implementations must
/// be safe to share across concurrent requests.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Commit records to the index in one batch. Existing ids are overwritten.
    async fn upsert(&self, records: &[IndexRecord]) -> Result<()>;

    /// Return up to `k` nearest records to `embedding`, closest first.
    ///
    /// An empty index yields an empty result, not an error.
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<RetrievalHit>>;

    /// Number of records currently in the collection.
    async fn count(&self) -> Result<usize>;

    /// Metadata of every record, for corpus-level aggregation.
    async fn list_metadata(&self) -> Result<Vec<ChunkMetadata>>;
}

/// Compute cosine distance (`1 - cosine similarity`) between two vectors.
///
/// Returns 1.0 (maximally distant) if either vector has zero magnitude.
pub(crate) fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}
