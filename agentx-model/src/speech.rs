//! Speech provider traits and errors.
//!
//! Speech-to-text is consumed only at the request boundary and
//! text-to-speech only at the response boundary; neither is part of the
//! retrieval core, so they carry their own error type.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from speech provider calls.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The provider request failed or returned a non-success status.
    #[error("Speech provider error ({provider}): {message}")]
    ProviderError {
        /// The speech provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for speech operations.
pub type Result<T> = std::result::Result<T, SpeechError>;

/// Transcribes audio to text.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe `audio` (a complete audio file) to text.
    ///
    /// `language_hint` is an ISO 639-1 code passed to the provider.
    async fn transcribe(&self, audio: Vec<u8>, language_hint: &str) -> Result<String>;
}

/// Synthesizes speech audio from text.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` into audio bytes using `voice_id`, or the
    /// provider's default voice when `None`.
    async fn synthesize_speech(&self, text: &str, voice_id: Option<&str>) -> Result<Vec<u8>>;
}
