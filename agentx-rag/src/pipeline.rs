//! RAG pipeline orchestrator.
//!
//! [`RagPipeline`] composes the chunker, embedding provider, vector store,
//! greeting detector, and answer synthesizer into two request-scoped
//! operations: [`ingest`](RagPipeline::ingest) (chunk → embed → store) and
//! [`answer_query`](RagPipeline::answer_query) (classify → retrieve →
//! assemble → synthesize → attribute).
//!
//! Error policy: ingestion failures propagate to the caller, since ingestion
//! is an administrative operation. Query failures never escape
//! `answer_query`; every internal error is converted into a localized
//! apology answer with empty sources at this boundary, after being logged in
//! structured form.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::attribution::attribute;
use crate::chunking::TextChunker;
use crate::config::RagConfig;
use crate::context::assemble_context;
use crate::document::{
    ChunkMetadata, Document, DocumentSummary, IndexRecord, IngestionReport, QueryResult,
};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::ChatModel;
use crate::greeting::{GreetingDetector, Language, QueryIntent};
use crate::messages::{apology_response, greeting_response, no_results_response};
use crate::retrieval::Retriever;
use crate::synthesis::AnswerSynthesizer;
use crate::vectorstore::VectorStore;

/// The RAG pipeline orchestrator. Construct one via [`RagPipeline::builder`].
///
/// Long-lived and shared across concurrent requests; no per-request mutable
/// state lives here, so no locking is needed beyond what the store and
/// provider clients do internally.
pub struct RagPipeline {
    config: RagConfig,
    chunker: TextChunker,
    detector: GreetingDetector,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    retriever: Retriever,
    synthesizer: AnswerSynthesizer,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Ingest one document: chunk, embed in a single batched call, and
    /// commit all records to the index in one write.
    ///
    /// Record ids combine the filename, chunk index, and a random component,
    /// so re-ingesting the same file appends new records (append-only; old
    /// chunks are never purged here). If embedding fails, nothing is written.
    ///
    /// # Errors
    ///
    /// - [`RagError::ValidationError`] if the document text is empty.
    /// - Provider and store errors propagate unchanged.
    pub async fn ingest(&self, document: &Document) -> Result<IngestionReport> {
        let filename = document.filename.as_str();
        if document.raw_text.trim().is_empty() {
            return Err(RagError::ValidationError(format!(
                "document '{filename}' has no text content"
            )));
        }

        let chunks: Vec<String> = self.chunker.split(&document.raw_text).collect();
        let texts: Vec<&str> = chunks.iter().map(|c| c.as_str()).collect();

        let embeddings = self.embedding_provider.embed_batch(&texts).await.inspect_err(|e| {
            error!(document = filename, error = %e, "embedding failed during ingestion");
        })?;
        if embeddings.len() != chunks.len() {
            return Err(RagError::PipelineError(format!(
                "provider returned {} embeddings for {} chunks of '{filename}'",
                embeddings.len(),
                chunks.len()
            )));
        }

        let records: Vec<IndexRecord> = chunks
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (text, embedding))| IndexRecord {
                id: format!("{filename}_{i}_{}", Uuid::new_v4()),
                embedding,
                metadata: ChunkMetadata {
                    source: filename.to_string(),
                    chunk_index: i,
                    length: text.chars().count(),
                },
                text,
            })
            .collect();

        self.vector_store.upsert(&records).await.inspect_err(|e| {
            error!(document = filename, error = %e, "index write failed during ingestion");
        })?;

        let chunks_added = records.len();
        info!(document = filename, chunks_added, "ingested document");
        Ok(IngestionReport { chunks_added })
    }

    /// Answer a question. Never fails: every internal error becomes a
    /// localized apology answer with empty sources.
    ///
    /// Recognized greetings short-circuit retrieval and generation entirely
    /// and return a canned friendly response in the hinted language.
    pub async fn answer_query(&self, question: &str) -> QueryResult {
        if let QueryIntent::Greeting(lang) = self.detector.classify(question) {
            info!(?lang, "greeting short-circuit");
            return QueryResult {
                answer: greeting_response(lang).to_string(),
                sources: Vec::new(),
            };
        }

        match self.run_query(question).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "query failed; returning apology");
                QueryResult {
                    answer: apology_response(Language::detect(question)).to_string(),
                    sources: Vec::new(),
                }
            }
        }
    }

    /// The retrieval path: retrieve → assemble → synthesize → attribute.
    ///
    /// Zero hits short-circuit to the fixed localized no-results notice
    /// instead of invoking the model with empty context; the observable
    /// behavior is the same, without the provider round trip.
    async fn run_query(&self, question: &str) -> Result<QueryResult> {
        let hits = self.retriever.retrieve(question, self.config.top_k).await?;

        if hits.is_empty() {
            info!("no retrieval hits; returning no-results notice");
            return Ok(QueryResult {
                answer: no_results_response(Language::detect(question)).to_string(),
                sources: Vec::new(),
            });
        }

        let context = assemble_context(&hits);
        let answer = self.synthesizer.synthesize(question, &context).await?;
        let sources = attribute(&hits);
        info!(source_count = sources.len(), "query completed");

        Ok(QueryResult { answer, sources })
    }

    /// List ingested documents by grouping index metadata by source.
    ///
    /// A pure aggregation over the index; nothing is stored separately.
    pub async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        let metadata = self.vector_store.list_metadata().await?;
        let mut counts = std::collections::BTreeMap::<String, usize>::new();
        for m in metadata {
            *counts.entry(m.source).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(source, chunk_count)| DocumentSummary { source, chunk_count })
            .collect())
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// `config`, `embedding_provider`, `vector_store`, and `chat_model` are
/// required; the greeting detector defaults to the built-in phrase table.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    chat_model: Option<Arc<dyn ChatModel>>,
    detector: Option<GreetingDetector>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the generative model used for answer synthesis.
    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.chat_model = Some(model);
        self
    }

    /// Override the greeting detector (e.g. with a custom phrase table).
    pub fn greeting_detector(mut self, detector: GreetingDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::ConfigError("vector_store is required".to_string()))?;
        let chat_model = self
            .chat_model
            .ok_or_else(|| RagError::ConfigError("chat_model is required".to_string()))?;

        let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap);
        let retriever = Retriever::new(Arc::clone(&embedding_provider), Arc::clone(&vector_store));
        let synthesizer = AnswerSynthesizer::new(chat_model, &config);

        Ok(RagPipeline {
            config,
            chunker,
            detector: self.detector.unwrap_or_default(),
            embedding_provider,
            vector_store,
            retriever,
            synthesizer,
        })
    }
}
