//! File-backed vector store.
//!
//! [`FileVectorStore`] keeps the whole collection in memory and mirrors it to
//! a JSON snapshot on local disk (`<dir>/<collection>.json`), so the index
//! survives process restarts. Snapshots are written to a temp file and
//! renamed into place, so a crash mid-write never truncates the collection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::document::{ChunkMetadata, IndexRecord, RetrievalHit};
use crate::error::{RagError, Result};
use crate::inmemory::nearest;
use crate::vectorstore::VectorStore;

/// A persistent [`VectorStore`] for one named collection.
pub struct FileVectorStore {
    path: PathBuf,
    records: RwLock<HashMap<String, IndexRecord>>,
}

impl FileVectorStore {
    /// Open (or create) the collection `name` under `dir`.
    ///
    /// Loads any existing snapshot from `<dir>/<name>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::VectorStoreError`] if the directory cannot be
    /// created or an existing snapshot cannot be read or parsed.
    pub async fn open(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await.map_err(|e| store_error(format!(
            "failed to create data directory '{}': {e}",
            dir.display()
        )))?;

        let path = dir.join(format!("{name}.json"));
        let records = if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                store_error(format!("failed to read snapshot '{}': {e}", path.display()))
            })?;
            let loaded: Vec<IndexRecord> = serde_json::from_slice(&bytes).map_err(|e| {
                store_error(format!("failed to parse snapshot '{}': {e}", path.display()))
            })?;
            loaded.into_iter().map(|r| (r.id.clone(), r)).collect()
        } else {
            HashMap::new()
        };

        info!(collection = name, records = records.len(), "opened vector store");
        Ok(Self { path, records: RwLock::new(records) })
    }

    /// Serialize the collection and atomically replace the snapshot on disk.
    async fn snapshot(&self, records: &HashMap<String, IndexRecord>) -> Result<()> {
        let all: Vec<&IndexRecord> = records.values().collect();
        let bytes = serde_json::to_vec(&all)
            .map_err(|e| store_error(format!("failed to serialize snapshot: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            store_error(format!("failed to write snapshot '{}': {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            store_error(format!("failed to replace snapshot '{}': {e}", self.path.display()))
        })
    }
}

fn store_error(message: String) -> RagError {
    RagError::VectorStoreError { backend: "file".to_string(), message }
}

#[async_trait]
impl VectorStore for FileVectorStore {
    async fn upsert(&self, records: &[IndexRecord]) -> Result<()> {
        // Snapshot under the write lock so concurrent upserts serialize.
        let mut store = self.records.write().await;
        let mut staged = store.clone();
        for record in records {
            staged.insert(record.id.clone(), record.clone());
        }
        self.snapshot(&staged).await?;
        // Commit to memory only once the snapshot is on disk, so a failed
        // write leaves memory and disk in agreement.
        *store = staged;
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
