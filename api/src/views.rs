//! Server-rendered HTML for the single page.
//!
//! Pure rendering over a session snapshot: nothing here mutates state. All
//! user-supplied text is escaped before interpolation, and multi-line text is
//! preserved with `white-space: pre-wrap` rather than markup rewriting.

use crate::core::app_state::Flash;
use crate::core::session::Session;
use crate::core::text_stats::TextStats;

/// How many history entries the page shows (newest first).
const HISTORY_WINDOW: usize = 5;

/// Display label length for a history question.
const LABEL_CHARS: usize = 50;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 860px; margin: 0 auto; padding: 24px; color: #222; }
header { display: flex; justify-content: space-between; align-items: baseline; }
h1 { font-size: 1.6em; }
hr { border: none; border-top: 1px solid #ddd; margin: 20px 0; }
textarea, input[type=text] { width: 100%; box-sizing: border-box; font: inherit; padding: 8px; }
button { font: inherit; padding: 8px 16px; cursor: pointer; }
button.danger { background: #fbe9e7; border: 1px solid #c62828; color: #c62828; }
.metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin: 12px 0; }
.metric { background: #f0f2f6; border-radius: 8px; padding: 12px; text-align: center; }
.metric .value { font-size: 1.3em; font-weight: 600; }
.metric .label { color: #666; font-size: 0.85em; }
.notice { padding: 10px 14px; border-radius: 6px; margin: 10px 0; }
.notice.ok { background: #e8f5e9; border-left: 5px solid #2e7d32; }
.notice.err { background: #fbe9e7; border-left: 5px solid #c62828; }
.notice.info { background: #e3f2fd; border-left: 5px solid #1565c0; }
.notice.warn { background: #fff8e1; border-left: 5px solid #f9a825; }
.answer { background: #f0f2f6; padding: 20px; border-radius: 10px; border-left: 5px solid #4caf50; margin: 10px 0; }
.answer h4 { color: #2e8b57; margin-top: 0; }
.prewrap { white-space: pre-wrap; line-height: 1.6; margin-bottom: 0; }
details { margin: 8px 0; }
summary { cursor: pointer; font-weight: 500; }
footer { text-align: center; color: #888; font-size: 14px; }
"#;

const BUSY_SCRIPT: &str = r#"
document.querySelectorAll('form').forEach(function (form) {
  form.addEventListener('submit', function () {
    var button = form.querySelector('button');
    if (button) { button.disabled = true; }
    if (form.dataset.busy) { button.textContent = form.dataset.busy; }
  });
});
"#;

/// Renders the complete page from a session snapshot and an optional
/// one-shot upload notice.
pub fn render_page(session: &Session, flash: Option<&Flash>) -> String {
    let mut out = String::with_capacity(8 * 1024 + session.context_text.len());

    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>Text Q&amp;A Assistant</title>\n");
    out.push_str("<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");

    out.push_str("<header>\n<h1>Ask Questions from Your Text</h1>\n");
    out.push_str(
        "<form method=\"post\" action=\"/clear\"><button class=\"danger\">Clear all data</button></form>\n",
    );
    out.push_str("</header>\n");

    out.push_str(
        "<details><summary>How to use</summary><ol>\
         <li>Paste your text or upload a .txt file</li>\
         <li>Ask questions about your text</li>\
         <li>Get AI-powered answers instantly</li></ol></details>\n<hr>\n",
    );

    upload_section(&mut out, flash);
    text_section(&mut out, session);

    if session.has_context() {
        stats_section(&mut out, session);
    }

    out.push_str("<hr>\n");
    question_section(&mut out, session);

    if !session.latest_answer.is_empty() {
        answer_section(&mut out, session);
    }

    if !session.history.is_empty() {
        history_section(&mut out, session);
    }

    if session.has_context() {
        context_section(&mut out, session);
    }

    out.push_str("<hr>\n<footer>Powered by Google Gemini</footer>\n");
    out.push_str("<script>");
    out.push_str(BUSY_SCRIPT);
    out.push_str("</script>\n</body>\n</html>\n");
    out
}

fn upload_section(out: &mut String, flash: Option<&Flash>) {
    out.push_str("<h2>1. Upload a Text File or Enter Text Manually</h2>\n");
    out.push_str(
        "<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"file\" accept=\".txt\">\n\
         <button>Upload</button>\n</form>\n",
    );

    match flash {
        Some(Flash::UploadOk(name)) => {
            out.push_str("<div class=\"notice ok\">File '");
            out.push_str(&escape_html(name));
            out.push_str("' uploaded successfully!</div>\n");
        }
        Some(Flash::UploadError(message)) => {
            out.push_str("<div class=\"notice err\">");
            out.push_str(&escape_html(message));
            out.push_str("</div>\n");
        }
        None => {}
    }
}

fn text_section(out: &mut String, session: &Session) {
    out.push_str("<form method=\"post\" action=\"/text\">\n");
    out.push_str(
        "<textarea name=\"text\" rows=\"10\" \
         placeholder=\"Enter the text you want to ask questions about...\">",
    );
    out.push_str(&escape_html(&session.context_text));
    out.push_str("</textarea>\n<button>Use this text</button>\n</form>\n");
}

fn stats_section(out: &mut String, session: &Session) {
    let stats = TextStats::of(&session.context_text);

    out.push_str("<h3>Text Statistics</h3>\n<div class=\"metrics\">\n");
    metric(out, "Characters", &fmt_thousands(stats.characters));
    metric(out, "Words", &fmt_thousands(stats.words));
    metric(out, "Lines", &fmt_thousands(stats.lines));
    metric(
        out,
        "Est. Reading Time",
        &format!("{} min", stats.reading_minutes),
    );
    out.push_str("</div>\n");

    if let Some(name) = &session.uploaded_file_name {
        out.push_str("<div class=\"notice info\">Content loaded from: <strong>");
        out.push_str(&escape_html(name));
        out.push_str("</strong></div>\n");
    }

    if stats.exceeds_context_limit() {
        out.push_str(
            "<div class=\"notice warn\">Large text detected! \
             The AI will process the first portion for better performance.</div>\n",
        );
    }
}

fn metric(out: &mut String, label: &str, value: &str) {
    out.push_str("<div class=\"metric\"><div class=\"value\">");
    out.push_str(value);
    out.push_str("</div><div class=\"label\">");
    out.push_str(label);
    out.push_str("</div></div>\n");
}

fn question_section(out: &mut String, session: &Session) {
    out.push_str("<h2>2. Ask Your Question</h2>\n");

    if session.has_context() {
        out.push_str("<form method=\"post\" action=\"/ask\" data-busy=\"Generating answer...\">\n");
        out.push_str(
            "<input type=\"text\" name=\"question\" \
             placeholder=\"e.g., What is the main topic? Summarize the key points...\">\n",
        );
        out.push_str("<button>Get Answer</button>\n</form>\n");
    } else {
        out.push_str(
            "<div class=\"notice info\">Please enter some text or upload a file above \
             to start asking questions!</div>\n",
        );
    }
}

fn answer_section(out: &mut String, session: &Session) {
    out.push_str("<hr>\n<h2>3. Latest Answer</h2>\n");
    out.push_str("<div class=\"answer\"><h4>Answer:</h4><p class=\"prewrap\">");
    out.push_str(&escape_html(&session.latest_answer));
    out.push_str("</p></div>\n");
}

fn history_section(out: &mut String, session: &Session) {
    out.push_str("<hr>\n<h2>4. Question History</h2>\n");

    // Newest first, display capped; the underlying log is unbounded.
    for (idx, entry) in session
        .history
        .iter()
        .enumerate()
        .rev()
        .take(HISTORY_WINDOW)
    {
        out.push_str("<details><summary>Q");
        out.push_str(&(idx + 1).to_string());
        out.push_str(": ");
        out.push_str(&escape_html(&truncate_label(&entry.question, LABEL_CHARS)));
        out.push_str(" (");
        out.push_str(&escape_html(&entry.timestamp));
        out.push_str(")</summary>\n<p><strong>Question:</strong></p><p class=\"prewrap\">");
        out.push_str(&escape_html(&entry.question));
        out.push_str("</p>\n<p><strong>Answer:</strong></p><p class=\"prewrap\">");
        out.push_str(&escape_html(&entry.answer));
        out.push_str("</p>\n</details>\n");
    }
}

fn context_section(out: &mut String, session: &Session) {
    out.push_str("<hr>\n<details><summary>View Original Text</summary>\n");
    out.push_str("<textarea rows=\"8\" readonly>");
    out.push_str(&escape_html(&session.context_text));
    out.push_str("</textarea>\n</details>\n");
}

/// Escapes text for interpolation into HTML element content and attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Truncates a display label to `max` characters, appending an ellipsis when
/// anything was cut. Operates on characters, so multi-byte text stays intact.
fn truncate_label(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Formats an integer with thousands separators (e.g., `50,000`).
fn fmt_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::QaEntry;

    fn session_with_history(n: usize) -> Session {
        let mut session = Session {
            context_text: "The sky is blue.".into(),
            ..Session::default()
        };
        for i in 1..=n {
            session.history.push(QaEntry {
                question: format!("question number {i}?"),
                answer: format!("answer {i}"),
                timestamp: "12:00:00".into(),
            });
        }
        session
    }

    #[test]
    fn escapes_user_text() {
        assert_eq!(
            escape_html("<b>&\"quoted\"</b>"),
            "&lt;b&gt;&amp;&quot;quoted&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn labels_truncate_at_fifty_chars() {
        let long = "x".repeat(80);
        let label = truncate_label(&long, 50);
        assert_eq!(label.chars().count(), 53);
        assert!(label.ends_with("..."));

        assert_eq!(truncate_label("short", 50), "short");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(60);
        let label = truncate_label(&text, 50);
        assert!(label.starts_with(&"é".repeat(50)));
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(fmt_thousands(7), "7");
        assert_eq!(fmt_thousands(1234), "1,234");
        assert_eq!(fmt_thousands(50_000), "50,000");
    }

    #[test]
    fn history_shows_last_five_newest_first() {
        let page = render_page(&session_with_history(7), None);

        let newest = page.find("Q7:").expect("newest entry shown");
        let oldest_shown = page.find("Q3:").expect("fifth-newest entry shown");
        assert!(newest < oldest_shown, "newest must come first");
        assert!(!page.contains("Q2:"));
        assert!(!page.contains("Q1:"));
    }

    #[test]
    fn question_form_requires_context() {
        let page = render_page(&Session::default(), None);
        assert!(!page.contains("action=\"/ask\""));
        assert!(page.contains("start asking questions"));

        let page = render_page(&session_with_history(0), None);
        assert!(page.contains("action=\"/ask\""));
    }

    #[test]
    fn large_context_renders_warning() {
        let mut session = Session::default();
        session.context_text = "a".repeat(60_000);
        let page = render_page(&session, None);
        assert!(page.contains("Large text detected"));

        session.context_text = "a".repeat(50_000);
        let page = render_page(&session, None);
        assert!(!page.contains("Large text detected"));
    }

    #[test]
    fn flash_notices_render_near_upload_control() {
        let session = Session::default();

        let page = render_page(&session, Some(&Flash::UploadOk("notes.txt".into())));
        assert!(page.contains("uploaded successfully"));

        let page = render_page(
            &session,
            Some(&Flash::UploadError("'x.bin' is not valid UTF-8 text".into())),
        );
        assert!(page.contains("not valid UTF-8"));
    }

    #[test]
    fn file_banner_follows_attribution() {
        let mut session = session_with_history(0);
        session.uploaded_file_name = Some("report.txt".into());
        let page = render_page(&session, None);
        assert!(page.contains("Content loaded from"));
        assert!(page.contains("report.txt"));
    }
}
