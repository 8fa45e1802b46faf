//! Answer generation chain with a single public entry point.
//!
//! Public API: [`AnswerChain::answer`]. It renders the fixed prompt template
//! with the user's context text and question, invokes the remote generative
//! model through the [`AnswerModel`] seam, and parses the raw output into
//! plain trimmed text. One question per call, no batching, no retries.

pub mod prompt;

mod error;
mod model;

use std::sync::Arc;

pub use error::QaChainError;
pub use model::AnswerModel;

use tracing::debug;

/// The prompt → model → parse pipeline behind the question form.
///
/// Holds one shared model client for the life of the process; the chain
/// itself is stateless and never touches session state.
///
/// # Example
/// ```no_run
/// # use std::sync::Arc;
/// # use qa_chain::AnswerChain;
/// # use llm_service::{GeminiService, config_gemini};
/// # #[tokio::main] async fn main() {
/// let svc = GeminiService::new(config_gemini().unwrap()).unwrap();
/// let chain = AnswerChain::new(Arc::new(svc));
/// let answer = chain.answer("The sky is blue.", "What color is the sky?").await.unwrap();
/// println!("{answer}");
/// # }
/// ```
pub struct AnswerChain {
    model: Arc<dyn AnswerModel>,
}

impl AnswerChain {
    /// Creates a chain over an already-constructed model client.
    pub fn new(model: Arc<dyn AnswerModel>) -> Self {
        Self { model }
    }

    /// Answer `question` using `context` as the only source of truth.
    ///
    /// Stateless and idempotent per call, apart from the nondeterminism of
    /// the remote model itself. The caller is responsible for recording the
    /// result in the session history.
    ///
    /// # Errors
    /// Propagates [`QaChainError::Llm`] from the provider call and returns
    /// [`QaChainError::EmptyAnswer`] when the model output is blank.
    pub async fn answer(&self, context: &str, question: &str) -> Result<String, QaChainError> {
        // 1) Render the fixed template.
        let prompt = prompt::build_prompt(context, question);
        debug!(
            context_len = context.len(),
            question_len = question.len(),
            prompt_len = prompt.len(),
            "prompt rendered"
        );

        // 2) Invoke the remote model.
        let raw = self.model.generate(&prompt).await?;

        // 3) Parse raw output into plain text.
        let answer = raw.trim();
        if answer.is_empty() {
            return Err(QaChainError::EmptyAnswer);
        }
        Ok(answer.to_string())
    }
}
