//! Normalized task document records
//!
//! A [`DocumentRecord`] is built from a split [`FrontMatter`] with defaults
//! filled for every missing attribute. Status and priority keep unrecognized
//! values verbatim so they can still be displayed.

use crate::frontmatter::FrontMatter;
use crate::markup::MarkupRenderer;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Reverse;
use std::fmt;
use std::time::SystemTime;

/// Task status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Not started (the default)
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Finished
    Completed,
    /// Abandoned
    Cancelled,
    /// Any other label, kept verbatim
    Other(String),
}

impl Status {
    /// The recognized statuses, in display order
    pub const RECOGNIZED: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Cancelled,
    ];

    /// Parse a header label (case-sensitive)
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            "pending" => Self::Pending,
            "in-progress" => Self::InProgress,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    /// Header label for this status
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(label) => label,
        }
    }

    /// Whether this is one of the four recognized statuses
    #[inline]
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// Low
    Low,
    /// Medium (the default)
    #[default]
    Medium,
    /// High
    High,
    /// Urgent
    Urgent,
    /// Any other label, kept verbatim
    Other(String),
}

impl Priority {
    /// Parse a header label (case-sensitive)
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "urgent" => Self::Urgent,
            other => Self::Other(other.to_string()),
        }
    }

    /// Header label for this priority
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One task document after default-filling and rendering
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    /// File name without the document extension
    pub identifier: String,
    /// `title` attribute, else the identifier
    pub title: String,
    /// `date` attribute, else the file's modification date (`YYYY-MM-DD`)
    pub date: String,
    /// `status` attribute, else pending
    pub status: Status,
    /// `priority` attribute, else medium
    pub priority: Priority,
    /// Body text after the header
    pub body_text: String,
    /// Rendered body
    pub body_html: String,
}

impl DocumentRecord {
    /// Build a record from a split document, filling defaults
    ///
    /// `fallback_date` is used when the header carries no `date`.
    #[must_use]
    pub fn from_parts(
        identifier: impl Into<String>,
        front_matter: FrontMatter,
        fallback_date: impl Into<String>,
        renderer: &dyn MarkupRenderer,
    ) -> Self {
        let identifier = identifier.into();
        let title = front_matter
            .attribute("title")
            .unwrap_or_else(|| identifier.clone());
        let date = front_matter
            .attribute("date")
            .unwrap_or_else(|| fallback_date.into());
        let status = front_matter
            .attribute("status")
            .map(|s| Status::parse(&s))
            .unwrap_or_default();
        let priority = front_matter
            .attribute("priority")
            .map(|p| Priority::parse(&p))
            .unwrap_or_default();
        let body_html = renderer.render(&front_matter.body);

        Self {
            identifier,
            title,
            date,
            status,
            priority,
            body_text: front_matter.body,
            body_html,
        }
    }

    /// Parsed `date`, if it is in a recognized format
    #[inline]
    #[must_use]
    pub fn sort_date(&self) -> Option<NaiveDateTime> {
        parse_sort_date(&self.date)
    }
}

/// Format a file timestamp as a UTC `YYYY-MM-DD` date
#[must_use]
pub fn format_file_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format("%Y-%m-%d").to_string()
}

/// Parse a date string for ordering
///
/// Accepts RFC 3339, `YYYY-MM-DD[ HH:MM[:SS]]`, `YYYY-MM-DDTHH:MM:SS` and
/// `YYYY/MM/DD`. Returns `None` for anything else.
#[must_use]
pub fn parse_sort_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Sort records newest first
///
/// Stable: equal dates keep their input order. Records whose date cannot be
/// parsed go after every dated record.
pub fn sort_by_date_desc(records: &mut [DocumentRecord]) {
    records.sort_by_cached_key(|record| Reverse(record.sort_date()));
}
