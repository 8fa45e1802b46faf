use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// This struct contains both general and provider-specific parameters.
/// It can be extended as needed to support new backends or features.
///
/// # Fields
///
/// - `provider`: Which LLM provider/backend to use (currently Gemini).
/// - `model`: The model identifier (e.g., `"gemini-1.5-flash-latest"`).
/// - `endpoint`: The inference endpoint (remote API base URL).
/// - `api_key`: Optional API key for providers that require authentication.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic, >1.0 = more random).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Gemini,
///     model: "gemini-1.5-flash-latest".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
///     api_key: Some("AIza...".to_string()),
///     max_tokens: None,
///     temperature: Some(0.7),
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// # let _ = cfg;
/// ```
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"gemini-1.5-flash-latest"`).
    pub model: String,

    /// Inference endpoint (remote API base URL).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
