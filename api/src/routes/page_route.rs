//! GET / — renders the whole page from a session snapshot.

use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::core::app_state::AppState;
use crate::views;

/// Handler: GET /
///
/// Takes a snapshot of the session under the lock, consumes any pending
/// flash notice, and renders everything in one pass. Statistics are derived
/// here per render, never stored.
pub async fn show_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let flash = state.take_flash();
    let session = state.session().clone();
    Html(views::render_page(&session, flash.as_ref()))
}
