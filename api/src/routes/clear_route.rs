//! POST /clear — resets the session to its empty defaults.

use std::sync::Arc;

use axum::{extract::State, response::Redirect};
use tracing::info;

use crate::core::app_state::AppState;

/// Handler: POST /clear
pub async fn clear_session(State(state): State<Arc<AppState>>) -> Redirect {
    state.session().clear();
    let _ = state.take_flash();
    info!("session cleared");
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app_state::tests::test_state;

    #[tokio::test]
    async fn clear_wipes_context_and_history() {
        let state = Arc::new(test_state());
        {
            let mut session = state.session();
            session.load_from_file("notes.txt".into(), "text".into());
            session.record_answer("q".into(), "a".into());
        }

        clear_session(State(state.clone())).await;

        let session = state.session();
        assert!(session.context_text.is_empty());
        assert!(session.history.is_empty());
        assert!(session.latest_answer.is_empty());
        assert!(session.uploaded_file_name.is_none());
    }
}
