//! In-memory vector store using cosine distance.
//!
//! Suitable for development and tests. Records are held in a `HashMap`
//! behind a `tokio::sync::RwLock`; nothing is persisted.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{ChunkMetadata, IndexRecord, RetrievalHit};
use crate::error::Result;
use crate::vectorstore::{VectorStore, cosine_distance};

/// An in-memory [`VectorStore`] backed by a `HashMap` keyed by record id.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    records: RwLock<HashMap<String, IndexRecord>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Score every record against the query and keep the `k` closest.
pub(crate) fn nearest(
    records: impl Iterator<Item = IndexRecord>,
    embedding: &[f32],
    k: usize,
) -> Vec<RetrievalHit> {
    let mut hits: Vec<RetrievalHit> = records
        .map(|record| RetrievalHit {
            distance: cosine_distance(&record.embedding, embedding),
            record_id: record.id,
            text: record.text,
            metadata: record.metadata,
        })
        .collect();
    hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(k);
    hits
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(&self, records: &[IndexRecord]) -> Result<()> {
        let mut store = self.records.write().await;
        for record in records {
            store.insert(record.id.clone(), record.clone());
        }
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<RetrievalHit>> {
        let store = self.records.read().await;
        Ok(nearest(store.values().cloned(), embedding, k))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }

    async fn list_metadata(&self) -> Result<Vec<ChunkMetadata>> {
        Ok(self.records.read().await.values().map(|r| r.metadata.clone()).collect())
    }
}
