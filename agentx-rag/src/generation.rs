//! Generative-model provider trait.

use async_trait::async_trait;

use crate::error::Result;

/// A generative model invoked with a fully assembled prompt.
///
/// Implementations wrap remote chat/completion APIs. The pipeline passes the
/// configured temperature and output budget on every call; the returned text
/// is used as-is apart from whitespace trimming.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a text completion for `prompt`.
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String>;
}
