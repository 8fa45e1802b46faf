//! Model seam: the chain talks to anything that can turn a prompt into text.

use async_trait::async_trait;
use llm_service::{GeminiService, LlmError};

/// A remote (or stubbed) text-generation backend.
///
/// The chain depends on this trait rather than a concrete client so unit
/// tests can replace the network call with a fixed string or a forced error.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    /// Generate raw model output for a fully rendered prompt.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl AnswerModel for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        GeminiService::generate(self, prompt).await
    }
}
