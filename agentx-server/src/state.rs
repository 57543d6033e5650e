//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use agentx_model::{SpeechToText, TextToSpeech};
use agentx_rag::RagPipeline;
use tokio::sync::Semaphore;

/// Long-lived state shared by all request handlers.
///
/// The pipeline and provider clients are read-mostly and safe to share; the
/// semaphore bounds how many query/ingest requests execute concurrently so
/// provider fan-out stays bounded.
#[derive(Clone)]
pub struct AppState {
    /// The composed RAG pipeline.
    pub pipeline: Arc<RagPipeline>,
    /// Speech-to-text provider for voice queries.
    pub stt: Arc<dyn SpeechToText>,
    /// Text-to-speech provider; `None` disables audio responses.
    pub tts: Option<Arc<dyn TextToSpeech>>,
    /// Concurrency bound for pipeline-invoking requests.
    pub limiter: Arc<Semaphore>,
    /// Directory where synthesized audio is written (served at `/audio`).
    pub audio_dir: PathBuf,
}
