//! POST /text — manual context entry from the textarea.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    response::Redirect,
};
use serde::Deserialize;

/// Form payload for /text.
#[derive(Debug, Deserialize)]
pub struct TextForm {
    /// Full textarea content; whichever of upload/manual entry came last wins.
    #[serde(default)]
    pub text: String,
}

use crate::core::app_state::AppState;

/// Handler: POST /text
///
/// Overwrites the context only when the submitted text differs from what is
/// stored, so re-posting an unchanged textarea keeps the file attribution.
pub async fn set_text(State(state): State<Arc<AppState>>, Form(form): Form<TextForm>) -> Redirect {
    state.session().apply_manual_edit(form.text);
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app_state::tests::test_state;

    #[tokio::test]
    async fn manual_entry_overwrites_context() {
        let state = Arc::new(test_state());
        state
            .session()
            .load_from_file("notes.txt".into(), "old".into());

        set_text(
            State(state.clone()),
            Form(TextForm {
                text: "new context".into(),
            }),
        )
        .await;

        let session = state.session();
        assert_eq!(session.context_text, "new context");
        assert!(session.uploaded_file_name.is_none());
    }
}
