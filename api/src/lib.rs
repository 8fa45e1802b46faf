//! HTTP layer of the Text Q&A Assistant.
//!
//! One server-rendered page plus the form actions that mutate the session:
//! manual text entry, file upload, question submission, and clear-all.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;
mod views;

pub use crate::error_handler::AppError;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;

use crate::core::app_state::AppState;
use crate::routes::{
    ask_route::ask_question, clear_route::clear_session, page_route::show_page,
    text_route::set_text, upload_route::upload_text,
};

/// Builds the application state from the environment and serves the page.
///
/// Fails fast (before binding) when the Gemini credential is missing, so a
/// misconfigured deployment dies with a clear config error instead of a
/// deferred runtime one.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);

    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".into());

    let app = Router::new()
        .route("/", get(show_page))
        .route("/text", post(set_text))
        .route("/upload", post(upload_text))
        .route("/ask", post(ask_question))
        .route("/clear", post(clear_session))
        .with_state(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    tracing::info!(%host_url, "serving Text Q&A Assistant");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    // Wait for the Ctrl+C signal
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
