//! Server entrypoint: wire settings, providers, the pipeline, and axum.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agentx_model::{ElevenLabsTts, OpenAiChat, OpenAiEmbeddings, TextToSpeech, WhisperStt};
use agentx_rag::{FileVectorStore, RagConfig, RagPipeline};
use agentx_server::{AppState, Settings, app, seed_if_empty};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env()?;

    let config = RagConfig::builder()
        .chunk_size(settings.chunk_size)
        .chunk_overlap(settings.chunk_overlap)
        .top_k(settings.top_k)
        .temperature(settings.temperature)
        .max_tokens(settings.max_tokens)
        .build()?;

    let embedder = OpenAiEmbeddings::new(&settings.openai_api_key)?
        .with_model(&settings.embedding_model, settings.embedding_dimensions);
    let chat = OpenAiChat::new(&settings.openai_api_key)?.with_model(&settings.openai_model);
    let store = FileVectorStore::open(&settings.data_dir, &settings.collection_name).await?;

    let pipeline = RagPipeline::builder()
        .config(config)
        .embedding_provider(Arc::new(embedder))
        .vector_store(Arc::new(store))
        .chat_model(Arc::new(chat))
        .build()?;

    let tts: Option<Arc<dyn TextToSpeech>> = match &settings.elevenlabs_api_key {
        Some(key) => Some(Arc::new(ElevenLabsTts::new(key)?)),
        None => {
            info!("ELEVENLABS_API_KEY not set; audio responses disabled");
            None
        }
    };

    let state = AppState {
        pipeline: Arc::new(pipeline),
        stt: Arc::new(WhisperStt::new(&settings.openai_api_key)?),
        tts,
        limiter: Arc::new(Semaphore::new(settings.max_concurrent_requests)),
        audio_dir: settings.audio_dir(),
    };

    seed_if_empty(&state, &settings).await?;

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "serving document QA API");

    axum::serve(listener, app(state)).await.context("server error")
}
