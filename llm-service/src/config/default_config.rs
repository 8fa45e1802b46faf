//! Default LLM configs loaded strictly from environment variables.
//!
//! This module provides the convenience constructor for [`LlmModelConfig`]
//! used by the Q&A page. The model identifier, endpoint, and sampling
//! temperature are pinned: answers should stay comparable across deployments,
//! so only the credential and token ceiling come from the environment.
//!
//! # Environment variables
//!
//! - `GOOGLE_API_KEY` = Gemini API credential (mandatory)
//! - `LLM_MAX_TOKENS` = optional max output tokens (u32)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{LlmError, env_opt_u32, must_env},
};

/// Base URL of the Gemini generative-language REST API.
pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pinned model identifier used for every answer.
pub const GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

/// Fixed sampling temperature for answer generation.
pub const GEMINI_TEMPERATURE: f32 = 0.7;

/// Constructs the Gemini config for answer generation.
///
/// Fails fast when the credential is absent so a misconfigured process never
/// reaches the point of serving a page that cannot answer anything.
///
/// # Env
/// - `GOOGLE_API_KEY` (required)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.7)`
/// - `timeout_secs = Some(60)`
///
/// # Errors
///
/// - [`crate::error_handler::ConfigError::MissingVar`] if `GOOGLE_API_KEY` is unset or empty
/// - [`crate::error_handler::ConfigError::InvalidNumber`] if `LLM_MAX_TOKENS` is not a `u32`
pub fn config_gemini() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("GOOGLE_API_KEY")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: GEMINI_MODEL.to_string(),
        endpoint: GEMINI_ENDPOINT.to_string(),
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(GEMINI_TEMPERATURE),
        top_p: None,
        timeout_secs: Some(60),
    })
}
