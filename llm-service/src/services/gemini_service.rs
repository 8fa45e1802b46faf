//! Gemini service for text generation.
//!
//! Minimal, synchronous (non-streaming) client around the Google Gemini REST
//! API. The endpoint is derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/models/{model}:generateContent — content generation
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Gemini`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.temperature`, when set, must lie in `0.0..=2.0`
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        HttpError, LlmError, Provider, ProviderError, ProviderErrorKind, make_snippet,
        validate_range_f32,
    },
};

/// Thin client for the Gemini generative-language API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
///
/// The only high-level operation is [`GeminiService::generate`] — a single,
/// non-streaming content generation call.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// Validates the provider, API key, endpoint scheme, and temperature.
    /// Builds an HTTP client with default headers and a configurable timeout.
    /// The API key travels in the `x-goog-api-key` header so it never appears
    /// in URLs or request logs.
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Gemini
    /// - [`LlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`LlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`LlmError::Config`] if `cfg.temperature` is out of range
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmError> {
        // 1) Provider must be Gemini.
        if cfg.provider != LlmProvider::Gemini {
            return Err(
                ProviderError::new(Provider::Gemini, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        // 2) API key must be present.
        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(Provider::Gemini, ProviderErrorKind::MissingApiKey)
        })?;

        // 3) Endpoint must use http/https.
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::Gemini,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        // 4) Sampling temperature, when set, must be sane.
        if let Some(t) = cfg.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }

        // 5) HTTP client: timeout + default headers.
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            header::HeaderValue::from_str(&api_key).map_err(|e| {
                ProviderError::new(
                    Provider::Gemini,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/models/{}:generateContent", base, cfg.model);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Performs a **non-streaming** content generation request.
    ///
    /// Sends a single user turn carrying `prompt` verbatim; sampling options
    /// (`temperature`, `top_p`, `max_tokens`) are mapped from the config into
    /// the request's `generationConfig`.
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`LlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`LlmError::Provider`] with `EmptyCandidates` if no text is returned
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            prompt_len = prompt.len(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = error_body_message(&text).unwrap_or_else(|| make_snippet(&text));

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                endpoint = %self.cfg.endpoint,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::Gemini,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: GenerateContentResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    endpoint = %self.cfg.endpoint,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode generateContent response"
                );
                return Err(ProviderError::new(
                    Provider::Gemini,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `candidates[0].content.parts[0].text`"
                    )),
                )
                .into());
            }
        };

        let content = extract_text(out).ok_or_else(|| {
            ProviderError::new(Provider::Gemini, ProviderErrorKind::EmptyCandidates)
        })?;

        info!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            latency_ms = started.elapsed().as_millis(),
            "content generation completed"
        );

        Ok(content)
    }
}

/// Joins all text parts of the first candidate, if any.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let parts = response.candidates?.into_iter().next()?.content?.parts;
    let text: String = parts.into_iter().filter_map(|part| part.text).collect();
    if text.is_empty() { None } else { Some(text) }
}

/// Extracts `error.message`/`error.status` from a Gemini error body, if the
/// body follows the documented `{"error": {...}}` shape.
fn error_body_message(body: &str) -> Option<String> {
    let wrapper: ErrorWrapper = serde_json::from_str(body).ok()?;
    let message = wrapper.error.message?;
    match wrapper.error.status {
        Some(status) if !status.is_empty() => Some(format!("{status}: {message}")),
        _ => Some(message),
    }
}

/* ===========================================================================
HTTP payloads & options
======================================================================== */

/// Minimal request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateContentRequest<'a> {
    /// Builds a minimal single-turn request from config and `prompt`.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        let generation_config = if cfg.temperature.is_some()
            || cfg.top_p.is_some()
            || cfg.max_tokens.is_some()
        {
            Some(GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_tokens,
            })
        } else {
            None
        };

        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config,
        }
    }
}

/// One conversation turn.
#[derive(Debug, Serialize)]
struct Content<'a> {
    /// One of: "user" | "model".
    role: &'a str,
    parts: Vec<Part<'a>>,
}

/// Plain text part; the API also accepts inline binary parts we never send.
#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Sampling knobs mapped from [`LlmModelConfig`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Minimal response for `generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Error envelope the API returns on non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config::{GEMINI_ENDPOINT, GEMINI_MODEL};
    use crate::error_handler::ConfigError;

    fn test_cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: GEMINI_MODEL.to_string(),
            endpoint: GEMINI_ENDPOINT.to_string(),
            api_key: Some("test-key".to_string()),
            max_tokens: Some(1024),
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn new_requires_api_key() {
        let cfg = LlmModelConfig {
            api_key: None,
            ..test_cfg()
        };
        match GeminiService::new(cfg) {
            Err(LlmError::Provider(e)) => {
                assert!(matches!(e.kind, ProviderErrorKind::MissingApiKey))
            }
            other => panic!("expected MissingApiKey, got {other:?}"),
        }
    }

    #[test]
    fn new_rejects_bad_endpoint() {
        let cfg = LlmModelConfig {
            endpoint: "generativelanguage.googleapis.com".to_string(),
            ..test_cfg()
        };
        match GeminiService::new(cfg) {
            Err(LlmError::Provider(e)) => {
                assert!(matches!(e.kind, ProviderErrorKind::InvalidEndpoint(_)))
            }
            other => panic!("expected InvalidEndpoint, got {other:?}"),
        }
    }

    #[test]
    fn new_rejects_out_of_range_temperature() {
        let cfg = LlmModelConfig {
            temperature: Some(5.0),
            ..test_cfg()
        };
        match GeminiService::new(cfg) {
            Err(LlmError::Config(ConfigError::OutOfRange { field, .. })) => {
                assert_eq!(field, "temperature")
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn new_builds_generate_url() {
        let svc = GeminiService::new(test_cfg()).unwrap();
        assert_eq!(
            svc.url_generate,
            format!("{GEMINI_ENDPOINT}/models/{GEMINI_MODEL}:generateContent")
        );
    }

    #[test]
    fn request_body_carries_prompt_and_sampling() {
        let cfg = test_cfg();
        let body = GenerateContentRequest::from_cfg(&cfg, "What color is the sky?");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            "What color is the sky?"
        );
        assert_eq!(json["contents"][0]["role"], "user");
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        // Unset knobs are omitted entirely.
        assert!(json["generationConfig"].get("topP").is_none());
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"The sky is blue."}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp).as_deref(), Some("The sky is blue."));
    }

    #[test]
    fn extract_text_joins_multipart_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"The sky "},{"text":"is blue."}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp).as_deref(), Some("The sky is blue."));
    }

    #[test]
    fn extract_text_handles_empty_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(extract_text(resp).is_none());

        let resp: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(extract_text(resp).is_none());
    }

    #[test]
    fn error_body_is_summarized() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            error_body_message(body).as_deref(),
            Some("RESOURCE_EXHAUSTED: Quota exceeded")
        );
        assert!(error_body_message("<html>gateway timeout</html>").is_none());
    }
}
