//! Typed error for the qa-chain crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaChainError {
    /// Errors from the underlying llm-service crate.
    #[error("LLM error: {0}")]
    Llm(#[from] llm_service::LlmError),

    /// The model answered but the parsed output was empty.
    #[error("model returned an empty answer")]
    EmptyAnswer,
}
