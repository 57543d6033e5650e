//! OpenAI providers: embeddings, chat completions, and Whisper transcription.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use agentx_rag::embedding::EmbeddingProvider;
use agentx_rag::error::{RagError, Result};
use agentx_rag::generation::ChatModel;

use crate::speech::{self, SpeechError, SpeechToText};

const EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const TRANSCRIPTIONS_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_WHISPER_MODEL: &str = "whisper-1";

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Extract the error message from a failed OpenAI response body.
async fn api_error_detail(response: reqwest::Response) -> (reqwest::StatusCode, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail =
        serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error.message).unwrap_or(body);
    (status, detail)
}

// ── Embeddings ──────────────────────────────────────────────────────

/// An [`EmbeddingProvider`] backed by the OpenAI `/v1/embeddings` endpoint.
///
/// Batches are sent in one request, so a whole document embeds in a single
/// round trip.
pub struct OpenAiEmbeddings {
    client: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbeddings {
    /// Create a new provider with the given API key and the default model
    /// (`text-embedding-ada-002`, 1536 dimensions).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmbeddingError`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::EmbeddingError {
                provider: "OpenAI".into(),
                message: "API key must not be empty".into(),
            });
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_EMBEDDING_MODEL.into(),
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        })
    }

    /// Set the embedding model and its output dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| RagError::EmbeddingError {
            provider: "OpenAI".into(),
            message: "API returned empty response".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = "OpenAI", batch_size = texts.len(), model = %self.model, "embedding batch");

        let response = self
            .client
            .post(EMBEDDINGS_URL)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest { model: &self.model, input: texts.to_vec() })
            .send()
            .await
            .map_err(|e| {
                error!(provider = "OpenAI", error = %e, "embeddings request failed");
                RagError::EmbeddingError {
                    provider: "OpenAI".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let (status, detail) = api_error_detail(response).await;
            error!(provider = "OpenAI", %status, "embeddings API error");
            return Err(RagError::EmbeddingError {
                provider: "OpenAI".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            RagError::EmbeddingError {
                provider: "OpenAI".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ── Chat completions ────────────────────────────────────────────────

/// A [`ChatModel`] backed by the OpenAI `/v1/chat/completions` endpoint.
pub struct OpenAiChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiChat {
    /// Create a new chat client with the default model (`gpt-3.5-turbo`).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::GenerationError`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::GenerationError {
                provider: "OpenAI".into(),
                message: "API key must not be empty".into(),
            });
        }
        Ok(Self { client: reqwest::Client::new(), api_key, model: DEFAULT_CHAT_MODEL.into() })
    }

    /// Set the chat model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String> {
        debug!(provider = "OpenAI", model = %self.model, prompt_len = prompt.len(), "chat completion");

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "OpenAI", error = %e, "chat request failed");
                RagError::GenerationError {
                    provider: "OpenAI".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let (status, detail) = api_error_detail(response).await;
            error!(provider = "OpenAI", %status, "chat API error");
            return Err(RagError::GenerationError {
                provider: "OpenAI".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            RagError::GenerationError {
                provider: "OpenAI".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        parsed.choices.into_iter().next().map(|c| c.message.content).ok_or_else(|| {
            RagError::GenerationError {
                provider: "OpenAI".into(),
                message: "API returned no choices".into(),
            }
        })
    }
}

// ── Whisper transcription ───────────────────────────────────────────

/// A [`SpeechToText`] provider backed by the OpenAI Whisper API.
pub struct WhisperStt {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl WhisperStt {
    /// Create a new Whisper client with the default model (`whisper-1`).
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError::ProviderError`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> speech::Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SpeechError::ProviderError {
                provider: "Whisper".into(),
                message: "API key must not be empty".into(),
            });
        }
        Ok(Self { client: reqwest::Client::new(), api_key, model: DEFAULT_WHISPER_MODEL.into() })
    }
}

#[async_trait]
impl SpeechToText for WhisperStt {
    async fn transcribe(&self, audio: Vec<u8>, language_hint: &str) -> speech::Result<String> {
        debug!(provider = "Whisper", audio_bytes = audio.len(), language_hint, "transcribing");

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| SpeechError::ProviderError {
                provider: "Whisper".into(),
                message: format!("failed to build audio part: {e}"),
            })?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", language_hint.to_string())
            .text("response_format", "text")
            .part("file", part);

        let response = self
            .client
            .post(TRANSCRIPTIONS_URL)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Whisper", error = %e, "transcription request failed");
                SpeechError::ProviderError {
                    provider: "Whisper".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let (status, detail) = api_error_detail(response).await;
            error!(provider = "Whisper", %status, "transcription API error");
            return Err(SpeechError::ProviderError {
                provider: "Whisper".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let text = response.text().await.map_err(|e| SpeechError::ProviderError {
            provider: "Whisper".into(),
            message: format!("failed to read response: {e}"),
        })?;
        Ok(text.trim().to_string())
    }
}
