//! Server settings loaded from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Read an environment variable, falling back to `default` when unset.
fn env_or<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value.parse::<T>().with_context(|| format!("invalid value for {key}")),
        Err(_) => Ok(default),
    }
}

/// Immutable server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// OpenAI API key (required), used for embeddings, chat, and Whisper.
    pub openai_api_key: String,
    /// ElevenLabs API key; TTS is disabled when unset.
    pub elevenlabs_api_key: Option<String>,
    /// Chat completion model name.
    pub openai_model: String,
    /// Embedding model name.
    pub embedding_model: String,
    /// Embedding output dimensionality.
    pub embedding_dimensions: usize,
    /// Directory holding the vector index snapshot and synthesized audio.
    pub data_dir: PathBuf,
    /// Vector index collection name.
    pub collection_name: String,
    /// Optional document ingested at startup when the index is empty.
    pub seed_data_path: Option<PathBuf>,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Maximum chunk size in chars.
    pub chunk_size: usize,
    /// Chunk overlap in chars.
    pub chunk_overlap: usize,
    /// Nearest neighbors requested per query.
    pub top_k: usize,
    /// Generation temperature.
    pub temperature: f32,
    /// Generation output budget in tokens.
    pub max_tokens: u32,
    /// Upper bound on concurrently executing query/ingest requests.
    pub max_concurrent_requests: usize,
}

impl Settings {
    /// Load settings from the environment.
    ///
    /// # Errors
    ///
    /// Fails when `OPENAI_API_KEY` is missing or a numeric variable does not
    /// parse.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable not set")?;
        let elevenlabs_api_key =
            std::env::var("ELEVENLABS_API_KEY").ok().filter(|k| !k.is_empty());

        Ok(Self {
            openai_api_key,
            elevenlabs_api_key,
            openai_model: env_or("OPENAI_MODEL", "gpt-3.5-turbo".to_string())?,
            embedding_model: env_or("EMBEDDING_MODEL", "text-embedding-ada-002".to_string())?,
            embedding_dimensions: env_or("EMBEDDING_DIMENSIONS", 1536)?,
            data_dir: env_or("DATA_DIR", PathBuf::from("./data"))?,
            collection_name: env_or("COLLECTION_NAME", "hr_documents".to_string())?,
            seed_data_path: std::env::var("SEED_DATA_PATH").ok().map(PathBuf::from),
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 8000)?,
            chunk_size: env_or("CHUNK_SIZE", 300)?,
            chunk_overlap: env_or("CHUNK_OVERLAP", 50)?,
            top_k: env_or("TOP_K", 5)?,
            temperature: env_or("TEMPERATURE", 0.4)?,
            max_tokens: env_or("MAX_TOKENS", 500)?,
            max_concurrent_requests: env_or("MAX_CONCURRENT_REQUESTS", 8)?,
        })
    }

    /// Directory where synthesized audio responses are written and served from.
    pub fn audio_dir(&self) -> PathBuf {
        self.data_dir.join("audio")
    }
}
