//! Error types for the `agentx-rag` crate.

use thiserror::Error;

/// Errors that can occur in RAG operations.
///
/// Ingestion-time errors propagate to the caller as hard failures.
/// Query-time errors are caught at the pipeline boundary and converted
/// into a localized apology answer (see [`crate::pipeline::RagPipeline::answer_query`]).
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during answer generation.
    #[error("Generation error ({provider}): {message}")]
    GenerationError {
        /// The generative-model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// Malformed input, e.g. an empty document.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error in the pipeline orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
