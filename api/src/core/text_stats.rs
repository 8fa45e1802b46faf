//! Read-only statistics derived from the context text on every render.

/// Contexts longer than this render a warning that only a leading portion is
/// used. Nothing is truncated here; the provider's own input limits apply.
pub const LARGE_CONTEXT_CHARS: usize = 50_000;

/// Words per minute assumed for the reading-time estimate.
const READING_WPM: f64 = 200.0;

/// Derived metrics for a context text. Never stored; recomputed per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    /// Unicode scalar values, not bytes.
    pub characters: usize,
    /// Whitespace-delimited tokens.
    pub words: usize,
    /// `'\n'`-separated segments.
    pub lines: usize,
    /// `max(1, round(words / 200))` minutes.
    pub reading_minutes: u64,
}

impl TextStats {
    /// Computes all metrics in one pass over the text.
    pub fn of(text: &str) -> Self {
        let words = text.split_whitespace().count();
        Self {
            characters: text.chars().count(),
            words,
            lines: text.split('\n').count(),
            reading_minutes: ((words as f64 / READING_WPM).round() as u64).max(1),
        }
    }

    /// Whether the large-context warning applies (strictly above the limit).
    pub fn exceeds_context_limit(&self) -> bool {
        self.characters > LARGE_CONTEXT_CHARS
    }
}
