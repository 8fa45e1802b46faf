//! POST /upload — single `.txt` file upload, interpreted as UTF-8.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::Redirect,
};
use tracing::{info, warn};

use crate::core::app_state::{AppState, Flash};

/// Handler: POST /upload
///
/// Decodes the uploaded bytes as UTF-8 and replaces the context on success.
/// A malformed upload surfaces as a flash notice near the upload control and
/// leaves the session untouched — no silent truncation, no partial state.
pub async fn upload_text(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Redirect {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "failed to read multipart upload");
                state.set_flash(Flash::UploadError(format!("Upload failed: {e}")));
                return Redirect::to("/");
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "uploaded.txt".to_string());

        let bytes = match field.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, file_name = %file_name, "failed to read upload body");
                state.set_flash(Flash::UploadError(format!("Upload failed: {e}")));
                return Redirect::to("/");
            }
        };

        store_upload(&state, file_name, &bytes);
        return Redirect::to("/");
    }

    state.set_flash(Flash::UploadError("No file was uploaded".to_string()));
    Redirect::to("/")
}

/// Decodes the upload and applies it to the session.
///
/// On invalid UTF-8 only a flash notice is queued; the existing context and
/// file attribution stay exactly as they were.
fn store_upload(state: &AppState, file_name: String, bytes: &[u8]) {
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            info!(file_name = %file_name, bytes = text.len(), "context loaded from file");
            state
                .session()
                .load_from_file(file_name.clone(), text.to_string());
            state.set_flash(Flash::UploadOk(file_name));
        }
        Err(_) => {
            warn!(file_name = %file_name, "upload is not valid UTF-8");
            state.set_flash(Flash::UploadError(format!(
                "'{file_name}' is not valid UTF-8 text"
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app_state::tests::test_state;

    #[test]
    fn valid_upload_replaces_context() {
        let state = test_state();
        store_upload(&state, "notes.txt".into(), "The sky is blue.".as_bytes());

        let session = state.session();
        assert_eq!(session.context_text, "The sky is blue.");
        assert_eq!(session.uploaded_file_name.as_deref(), Some("notes.txt"));
        drop(session);
        assert!(matches!(state.take_flash(), Some(Flash::UploadOk(_))));
    }

    #[test]
    fn invalid_utf8_leaves_session_untouched() {
        let state = test_state();
        state
            .session()
            .load_from_file("old.txt".into(), "prior context".into());

        // 0xFF can never start a UTF-8 sequence.
        store_upload(&state, "garbage.bin".into(), &[0xFF, 0xFE, b'a']);

        let session = state.session();
        assert_eq!(session.context_text, "prior context");
        assert_eq!(session.uploaded_file_name.as_deref(), Some("old.txt"));
        drop(session);

        match state.take_flash() {
            Some(Flash::UploadError(message)) => {
                assert!(message.contains("garbage.bin"));
                assert!(message.contains("not valid UTF-8"));
            }
            other => panic!("expected UploadError, got {other:?}"),
        }
    }
}
