//! Data types for documents, index records, retrieval hits, and query results.

use serde::{Deserialize, Serialize};

/// A source document to be ingested: a filename plus its raw text.
///
/// Documents are immutable after ingestion. Re-ingesting the same filename
/// appends new chunk records with fresh ids; it never mutates or removes
/// existing ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The name of the source file this document came from.
    pub filename: String,
    /// The full raw text of the document.
    pub raw_text: String,
}

impl Document {
    /// Create a new document from a filename and its raw text.
    pub fn new(filename: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self { filename: filename.into(), raw_text: raw_text.into() }
    }
}

/// Provenance metadata attached to every indexed chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkMetadata {
    /// The filename of the source document.
    pub source: String,
    /// The zero-based position of this chunk within its document.
    pub chunk_index: usize,
    /// The chunk text length in Unicode scalar values.
    pub length: usize,
}

/// A record persisted in the vector index: one embedded chunk plus metadata.
///
/// Created during ingestion and never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexRecord {
    /// Globally unique record id, collision-free across repeated ingestions.
    pub id: String,
    /// The embedding vector for this chunk's text.
    pub embedding: Vec<f32>,
    /// The chunk text.
    pub text: String,
    /// Provenance metadata.
    pub metadata: ChunkMetadata,
}

/// A retrieved record paired with its distance to the query embedding.
///
/// Ephemeral: produced per query, never persisted. Distance units are
/// whatever the index's metric reports (cosine distance for the bundled
/// stores); the retriever passes them through without normalizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalHit {
    /// Id of the matched index record.
    pub record_id: String,
    /// The matched chunk text.
    pub text: String,
    /// Provenance metadata of the matched record.
    pub metadata: ChunkMetadata,
    /// Distance between the query embedding and the record (lower is closer).
    pub distance: f32,
}

/// Human-readable provenance for one retrieval hit.
///
/// `relevance_score` is `1 - distance` and is deliberately unclamped: it can
/// be negative or exceed 1 depending on the index's distance metric. Callers
/// needing a bounded score must clamp it themselves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceAttribution {
    /// The filename of the source document.
    pub source: String,
    /// The chunk's position within its document.
    pub chunk_id: usize,
    /// Unclamped relevance derived as `1 - distance`.
    pub relevance_score: f32,
}

/// The terminal output of a query: an answer plus ordered source attributions.
///
/// `sources` has exactly one entry per retrieval hit, in retrieval order.
/// Greeting short-circuits and failures always carry empty `sources`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The answer text shown to the user.
    pub answer: String,
    /// Source attributions in retrieval order.
    pub sources: Vec<SourceAttribution>,
}

/// Summary returned by ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestionReport {
    /// Number of chunk records committed to the index.
    pub chunks_added: usize,
}

/// One entry of the document listing: a source file and its chunk count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSummary {
    /// The filename of the source document.
    pub source: String,
    /// Number of chunks indexed for this source.
    pub chunk_count: usize,
}
