//! Answer synthesis: prompt construction plus generative-model invocation.

use std::sync::Arc;

use tracing::debug;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::ChatModel;

/// Build the final prompt: system instructions, assembled context, and the
/// verbatim question.
///
/// The instruction block sets tone and domain scope and directs the model to
/// acknowledge insufficient information rather than fabricate.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "\nأنت مساعد ذكي ودود متخصص في الإجابة على الأسئلة المتعلقة بشركة AgentX AI وسياسات الموارد البشرية.\n\n\
تعليمات مهمة:\n\
1. كن ودوداً ومفيداً في جميع إجاباتك\n\
2. إذا سُئلت أسئلة عامة أو ودية، جاوب بشكل طبيعي وودود\n\
3. ركز على تقديم معلومات دقيقة ومفيدة\n\
4. إذا لم تكن المعلومات كافية، اقترح طرق للحصول على مزيد من المساعدة\n\n\
المعلومات المتاحة:\n{context}\n\n\
السؤال: {question}\n\n\
الإجابة: قدم إجابة شاملة ودقيقة وودية باللغة العربية بناءً على المعلومات المتاحة أعلاه.\n"
    )
}

/// Invokes the generative model with the assembled prompt.
pub struct AnswerSynthesizer {
    model: Arc<dyn ChatModel>,
    temperature: f32,
    max_tokens: u32,
}

impl AnswerSynthesizer {
    /// Create a synthesizer using the generation settings from `config`.
    pub fn new(model: Arc<dyn ChatModel>, config: &RagConfig) -> Self {
        Self { model, temperature: config.temperature, max_tokens: config.max_tokens }
    }

    /// Generate an answer for `question` given the assembled `context`.
    ///
    /// Returns the model's output trimmed of surrounding whitespace and
    /// otherwise unmodified.
    pub async fn synthesize(&self, question: &str, context: &str) -> Result<String> {
        let prompt = build_prompt(question, context);
        debug!(prompt_len = prompt.len(), "invoking generative model");
        let answer = self.model.generate(&prompt, self.temperature, self.max_tokens).await?;
        Ok(answer.trim().to_string())
    }
}
