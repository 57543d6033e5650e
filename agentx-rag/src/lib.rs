//! # agentx-rag
//!
//! Retrieval-augmented document QA: ingestion (chunk → embed → index) and
//! querying (classify → retrieve → assemble → synthesize → attribute)
//! against a private document corpus.
//!
//! ## Overview
//!
//! - [`RagPipeline`] — the composed ingestion and query pipeline
//! - [`TextChunker`] — boundary-aware overlapping chunker
//! - [`GreetingDetector`] — small-talk short-circuit classification
//! - [`EmbeddingProvider`] / [`ChatModel`] — provider traits (see `agentx-model`)
//! - [`VectorStore`] — index trait, with [`InMemoryVectorStore`] and the
//!   file-backed [`FileVectorStore`]
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use agentx_rag::{Document, FileVectorStore, RagConfig, RagPipeline};
//!
//! let store = Arc::new(FileVectorStore::open("./data", "hr_documents").await?);
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(embedder)
//!     .vector_store(store)
//!     .chat_model(model)
//!     .build()?;
//!
//! pipeline.ingest(&Document::new("hr_data.txt", text)).await?;
//! let result = pipeline.answer_query("ما هي سياسة الإجازات؟").await;
//! ```

pub mod attribution;
pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod fsstore;
pub mod generation;
pub mod greeting;
pub mod inmemory;
pub mod messages;
pub mod pipeline;
pub mod retrieval;
pub mod synthesis;
pub mod vectorstore;

pub use attribution::attribute;
pub use chunking::TextChunker;
pub use config::{RagConfig, RagConfigBuilder};
pub use context::assemble_context;
pub use document::{
    ChunkMetadata, Document, DocumentSummary, IndexRecord, IngestionReport, QueryResult,
    RetrievalHit, SourceAttribution,
};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use fsstore::FileVectorStore;
pub use generation::ChatModel;
pub use greeting::{GreetingDetector, Language, QueryIntent};
pub use inmemory::InMemoryVectorStore;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use retrieval::Retriever;
pub use synthesis::AnswerSynthesizer;
pub use vectorstore::VectorStore;
