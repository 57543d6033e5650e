//! Query-time retrieval: embed the question, search the index.

use std::sync::Arc;

use tracing::debug;

use crate::document::RetrievalHit;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::VectorStore;

/// Embeds questions and fetches their nearest indexed chunks.
///
/// Hits come back ordered by nondecreasing distance, in the index's own
/// metric. The retriever never normalizes or clips distances; relevance
/// scoring happens downstream in attribution.
pub struct Retriever {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
}

impl Retriever {
    /// Create a retriever over the given provider and store.
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self { embedding_provider, vector_store }
    }

    /// Return up to `k` hits for `question`, most relevant first.
    ///
    /// An empty index yields an empty sequence; callers must treat that as
    /// "no relevant context", not an error.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<RetrievalHit>> {
        let query_embedding = self.embedding_provider.embed(question).await?;
        let hits = self.vector_store.query(&query_embedding, k).await?;
        debug!(hit_count = hits.len(), k, "retrieval completed");
        Ok(hits)
    }
}
