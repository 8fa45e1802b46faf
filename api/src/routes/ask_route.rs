//! POST /ask — runs the answer chain and appends to the history.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::core::app_state::AppState;

/// Form payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskForm {
    /// Natural language question about the current context.
    #[serde(default)]
    pub question: String,
}

/// Handler: POST /ask
///
/// Whitespace-only questions are a no-op. Otherwise the handler snapshots the
/// context, awaits the chain without holding the session lock, and records
/// the outcome — a generation failure is logged with its typed kind, then
/// rendered into the history exactly like an answer.
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AskForm>,
) -> Redirect {
    let question = form.question.trim().to_string();
    if question.is_empty() {
        return Redirect::to("/");
    }

    let context = state.session().context_text.clone();
    if context.trim().is_empty() {
        return Redirect::to("/");
    }

    let answer = match state.chain.answer(&context, &question).await {
        Ok(answer) => {
            info!(question_len = question.len(), "question answered");
            answer
        }
        Err(e) => {
            error!(error = %e, "answer generation failed");
            format!("Error generating answer: {e}")
        }
    };

    state.session().record_answer(question, answer);
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app_state::tests::{failing_state, test_state};

    #[tokio::test]
    async fn whitespace_question_is_a_noop() {
        let state = Arc::new(test_state());
        state.session().apply_manual_edit("some context".into());

        ask_question(
            State(state.clone()),
            Form(AskForm {
                question: "   \t ".into(),
            }),
        )
        .await;

        assert!(state.session().history.is_empty());
        assert!(state.session().latest_answer.is_empty());
    }

    #[tokio::test]
    async fn question_without_context_is_a_noop() {
        let state = Arc::new(test_state());

        ask_question(
            State(state.clone()),
            Form(AskForm {
                question: "What is this about?".into(),
            }),
        )
        .await;

        assert!(state.session().history.is_empty());
    }

    #[tokio::test]
    async fn failed_generation_lands_in_history_as_error_text() {
        let state = Arc::new(failing_state());
        state.session().apply_manual_edit("The sky is blue.".into());

        ask_question(
            State(state.clone()),
            Form(AskForm {
                question: "What color is the sky?".into(),
            }),
        )
        .await;

        let session = state.session();
        assert_eq!(session.history.len(), 1);
        assert!(
            session.history[0]
                .answer
                .starts_with("Error generating answer:"),
            "got: {}",
            session.history[0].answer
        );
        assert_eq!(session.latest_answer, session.history[0].answer);
    }

    #[tokio::test]
    async fn submissions_append_in_order() {
        let state = Arc::new(test_state());
        state.session().apply_manual_edit("The sky is blue.".into());

        for q in ["first?", "second?", "third?"] {
            ask_question(
                State(state.clone()),
                Form(AskForm {
                    question: q.into(),
                }),
            )
            .await;
        }

        let session = state.session();
        assert_eq!(session.history.len(), 3);
        assert_eq!(session.history[0].question, "first?");
        assert_eq!(session.history[2].question, "third?");
        assert_eq!(session.latest_answer, session.history[2].answer);
    }
}
