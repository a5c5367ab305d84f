//! Dashboard page rendering
//!
//! Cards are rendered per record and the template's `{{NAME}}` placeholders
//! are substituted in a single pass. Unknown placeholders are left as they
//! are, and substituted values are never scanned again.

use crate::labels::Locale;
use crate::tally::StatusTally;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt::Write;
use taskline_document::DocumentRecord;

/// Template placeholder names
pub mod placeholders {
    /// Diagram source
    pub const MERMAID_TIMELINE: &str = "MERMAID_TIMELINE";
    /// Pending count
    pub const TASK_PENDING_COUNT: &str = "TASK_PENDING_COUNT";
    /// In-progress count
    pub const TASK_IN_PROGRESS_COUNT: &str = "TASK_IN_PROGRESS_COUNT";
    /// Completed count
    pub const TASK_COMPLETED_COUNT: &str = "TASK_COMPLETED_COUNT";
    /// Cancelled count
    pub const TASK_CANCELLED_COUNT: &str = "TASK_CANCELLED_COUNT";
    /// Tally total
    pub const TASK_TOTAL_COUNT: &str = "TASK_TOTAL_COUNT";
    /// Concatenated card markup
    pub const TASKS_HTML: &str = "TASKS_HTML";
    /// Number of documents
    pub const POSTS_COUNT: &str = "POSTS_COUNT";

    /// Every placeholder the renderer fills
    pub const ALL: [&str; 8] = [
        MERMAID_TIMELINE,
        TASK_PENDING_COUNT,
        TASK_IN_PROGRESS_COUNT,
        TASK_COMPLETED_COUNT,
        TASK_CANCELLED_COUNT,
        TASK_TOTAL_COUNT,
        TASKS_HTML,
        POSTS_COUNT,
    ];
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Z][A-Z0-9_]*)\}\}").expect("placeholder pattern is valid"));

/// Renders the dashboard page from a template
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRenderer {
    locale: Locale,
}

impl PageRenderer {
    /// Create renderer with the given label locale
    #[inline]
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Label locale
    #[inline]
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Render the full page
    ///
    /// `records` must already be in display order.
    #[must_use]
    pub fn render(
        &self,
        template: &str,
        records: &[DocumentRecord],
        diagram: &str,
        tally: &StatusTally,
    ) -> String {
        let cards = self.render_cards(records);

        substitute(template, |name| {
            let value = match name {
                placeholders::MERMAID_TIMELINE => diagram.to_string(),
                placeholders::TASK_PENDING_COUNT => tally.pending.to_string(),
                placeholders::TASK_IN_PROGRESS_COUNT => tally.in_progress.to_string(),
                placeholders::TASK_COMPLETED_COUNT => tally.completed.to_string(),
                placeholders::TASK_CANCELLED_COUNT => tally.cancelled.to_string(),
                placeholders::TASK_TOTAL_COUNT => tally.total.to_string(),
                placeholders::TASKS_HTML => cards.clone(),
                placeholders::POSTS_COUNT => records.len().to_string(),
                _ => return None,
            };
            Some(value)
        })
    }

    /// Render all cards, concatenated in record order
    #[must_use]
    pub fn render_cards(&self, records: &[DocumentRecord]) -> String {
        records.iter().fold(String::new(), |mut out, record| {
            self.write_card(&mut out, record);
            out
        })
    }

    /// Render one card
    #[must_use]
    pub fn render_card(&self, record: &DocumentRecord) -> String {
        let mut out = String::new();
        self.write_card(&mut out, record);
        out
    }

    fn write_card(&self, out: &mut String, record: &DocumentRecord) {
        let status = escape_html(record.status.as_str());
        let priority = escape_html(record.priority.as_str());
        let status_label = self.locale.status_label(&record.status);
        let priority_label = self.locale.priority_label(&record.priority);

        // Writing into a String cannot fail.
        let _ = write!(
            out,
            r#"
<div class="task-card {status}">
    <div class="task-header">
        <h3>{title}</h3>
        <span class="task-date">{date}</span>
    </div>
    <div class="task-status {status}">{status_label}</div>
    <div class="task-priority {priority}">{priority_label}</div>
    <div class="task-content">{body}</div>
</div>
"#,
            title = escape_html(&record.title),
            date = escape_html(&record.date),
            status_label = escape_html(&status_label),
            priority_label = escape_html(&priority_label),
            body = record.body_html,
        );
    }
}

/// Replace every `{{NAME}}` token for which `lookup` returns a value
///
/// Tokens `lookup` does not know are kept verbatim.
pub fn substitute<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Escape text for use in HTML content and attribute values
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
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
    Cow::Owned(out)
}
