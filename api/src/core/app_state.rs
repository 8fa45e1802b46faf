use std::sync::{Arc, Mutex, MutexGuard};

use llm_service::{GeminiService, config_gemini};
use qa_chain::AnswerChain;

use crate::core::session::Session;
use crate::error_handler::AppError;

/// One-shot notice rendered next to the upload control and then discarded.
#[derive(Debug, Clone)]
pub enum Flash {
    /// File decoded and loaded; carries the file name.
    UploadOk(String),
    /// Upload rejected; carries the reason shown to the user.
    UploadError(String),
}

/// Shared state for all HTTP handlers.
///
/// The model client is constructed once per process and owned here; the
/// session lives behind a mutex that handlers hold only for short,
/// non-awaiting critical sections.
pub struct AppState {
    /// The prompt → model → parse pipeline.
    pub chain: AnswerChain,
    /// The single logical user session.
    session: Mutex<Session>,
    /// Pending one-shot notice, consumed by the next page render.
    flash: Mutex<Option<Flash>>,
}

impl AppState {
    /// Loads shared state from environment variables.
    ///
    /// # Errors
    /// Propagates config/validation errors (notably a missing
    /// `GOOGLE_API_KEY`) so the process fails before binding.
    pub fn from_env() -> Result<Self, AppError> {
        let svc = GeminiService::new(config_gemini()?)?;

        Ok(Self {
            chain: AnswerChain::new(Arc::new(svc)),
            session: Mutex::new(Session::default()),
            flash: Mutex::new(None),
        })
    }

    /// Locks the session. Never hold the guard across an `.await`.
    pub fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().expect("session lock poisoned")
    }

    /// Queues a notice for the next render.
    pub fn set_flash(&self, flash: Flash) {
        *self.flash.lock().expect("flash lock poisoned") = Some(flash);
    }

    /// Takes the pending notice, leaving none behind.
    pub fn take_flash(&self) -> Option<Flash> {
        self.flash.lock().expect("flash lock poisoned").take()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use qa_chain::AnswerChain;

    /// Test double that never leaves the process.
    struct EchoModel;

    #[async_trait::async_trait]
    impl qa_chain::AnswerModel for EchoModel {
        async fn generate(&self, prompt: &str) -> Result<String, llm_service::LlmError> {
            Ok(format!("echo: {}", prompt.len()))
        }
    }

    /// Test double whose every call fails at the provider layer.
    struct FailingModel;

    #[async_trait::async_trait]
    impl qa_chain::AnswerModel for FailingModel {
        async fn generate(&self, _prompt: &str) -> Result<String, llm_service::LlmError> {
            use llm_service::error_handler::{Provider, ProviderError, ProviderErrorKind};
            Err(ProviderError::new(Provider::Gemini, ProviderErrorKind::EmptyCandidates).into())
        }
    }

    pub(crate) fn test_state() -> AppState {
        AppState {
            chain: AnswerChain::new(Arc::new(EchoModel)),
            session: Mutex::new(Session::default()),
            flash: Mutex::new(None),
        }
    }

    pub(crate) fn failing_state() -> AppState {
        AppState {
            chain: AnswerChain::new(Arc::new(FailingModel)),
            session: Mutex::new(Session::default()),
            flash: Mutex::new(None),
        }
    }

    #[test]
    fn flash_is_one_shot() {
        let state = test_state();
        assert!(state.take_flash().is_none());

        state.set_flash(Flash::UploadOk("notes.txt".into()));
        assert!(matches!(state.take_flash(), Some(Flash::UploadOk(_))));
        assert!(state.take_flash().is_none());
    }
}
