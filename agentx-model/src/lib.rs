//! # agentx-model
//!
//! Provider integrations for the `agentx-rag` pipeline: OpenAI embeddings
//! and chat completions, OpenAI Whisper transcription, and ElevenLabs
//! text-to-speech. All are single-call stateless wrappers around the remote
//! HTTP APIs, built on `reqwest`.

pub mod elevenlabs;
pub mod openai;
pub mod speech;

pub use elevenlabs::ElevenLabsTts;
pub use openai::{OpenAiChat, OpenAiEmbeddings, WhisperStt};
pub use speech::{SpeechError, SpeechToText, TextToSpeech};
