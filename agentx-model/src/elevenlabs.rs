//! ElevenLabs text-to-speech provider.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use crate::speech::{Result, SpeechError, TextToSpeech};

const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
const TTS_MODEL: &str = "eleven_multilingual_v2";

/// A [`TextToSpeech`] provider backed by the ElevenLabs API.
///
/// Uses the multilingual model so Arabic answers are voiced correctly.
pub struct ElevenLabsTts {
    client: reqwest::Client,
    api_key: String,
}

impl ElevenLabsTts {
    /// Create a new client with the given API key.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError::ProviderError`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SpeechError::ProviderError {
                provider: "ElevenLabs".into(),
                message: "API key must not be empty".into(),
            });
        }
        Ok(Self { client: reqwest::Client::new(), api_key })
    }
}

#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self { stability: 0.35, similarity_boost: 0.7, style: 0.8, use_speaker_boost: true }
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsTts {
    async fn synthesize_speech(&self, text: &str, voice_id: Option<&str>) -> Result<Vec<u8>> {
        let voice = voice_id.unwrap_or(DEFAULT_VOICE_ID);
        debug!(provider = "ElevenLabs", voice, text_len = text.len(), "synthesizing speech");

        let url = format!("{ELEVENLABS_BASE_URL}/text-to-speech/{voice}");
        let request = TtsRequest {
            text,
            model_id: TTS_MODEL,
            voice_settings: VoiceSettings::default(),
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "ElevenLabs", error = %e, "tts request failed");
                SpeechError::ProviderError {
                    provider: "ElevenLabs".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!(provider = "ElevenLabs", %status, "tts API error");
            return Err(SpeechError::ProviderError {
                provider: "ElevenLabs".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let bytes = response.bytes().await.map_err(|e| SpeechError::ProviderError {
            provider: "ElevenLabs".into(),
            message: format!("failed to read audio body: {e}"),
        })?;
        Ok(bytes.to_vec())
    }
}
