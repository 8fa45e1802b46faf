//! Ephemeral per-session state: context text plus the Q&A log.

use chrono::Local;

/// One recorded question/answer pair.
///
/// Immutable once appended; entries are only ever removed en masse by
/// [`Session::clear`].
#[derive(Debug, Clone)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
    /// Wall-clock time of day when the entry was recorded (`%H:%M:%S`).
    pub timestamp: String,
}

/// State belonging to one interactive visit.
///
/// Created with empty defaults, mutated by the input and ask handlers, and
/// destroyed by the clear action. The history is a log, not a derived view:
/// replacing the context text never rewrites past entries.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The passage questions are answered against.
    pub context_text: String,
    /// All recorded Q&A entries in append order (newest last). Unbounded;
    /// only the display window is capped.
    pub history: Vec<QaEntry>,
    /// The most recent answer (or rendered error text).
    pub latest_answer: String,
    /// Name of the uploaded file the context came from, if any.
    pub uploaded_file_name: Option<String>,
}

impl Session {
    /// Replaces the context with decoded file content.
    pub fn load_from_file(&mut self, file_name: String, text: String) {
        self.context_text = text;
        self.uploaded_file_name = Some(file_name);
    }

    /// Applies a manual edit: only when the submitted text actually differs
    /// does it overwrite the context and drop the file attribution.
    pub fn apply_manual_edit(&mut self, text: String) {
        if text != self.context_text {
            self.context_text = text;
            self.uploaded_file_name = None;
        }
    }

    /// Appends a Q&A entry stamped with the current time of day and makes it
    /// the latest answer.
    pub fn record_answer(&mut self, question: String, answer: String) {
        self.latest_answer = answer.clone();
        self.history.push(QaEntry {
            question,
            answer,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        });
    }

    /// Whether there is any context worth asking about.
    pub fn has_context(&self) -> bool {
        !self.context_text.trim().is_empty()
    }

    /// Resets every field to its default. Callers holding the session lock
    /// observe this as one atomic reset.
    pub fn clear(&mut self) {
        *self = Session::default();
    }
}
