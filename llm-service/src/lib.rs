//! Provider client crate for the remote generative model.
//!
//! Exposes a thin, non-streaming client for the Google Gemini REST API
//! ([`services::gemini_service::GeminiService`]), configuration structs
//! built strictly from environment variables, and a unified error type
//! ([`error_handler::LlmError`]) shared across the crate.

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::default_config::config_gemini;
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use services::gemini_service::GeminiService;
