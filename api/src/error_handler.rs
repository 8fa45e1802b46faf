use thiserror::Error;

/// Public application error type.
///
/// Startup-only: request handlers never return this — input problems become
/// flash notices and generation failures are rendered as answer text, so the
/// page itself cannot crash a session.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] llm_service::LlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),
}
