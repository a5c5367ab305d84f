//! Display labels for status and priority values

use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use taskline_document::{Priority, Status};

/// Language used for status and priority labels on cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Simplified Chinese
    #[default]
    #[serde(alias = "zh-cn")]
    Zh,
    /// English
    En,
}

/// Unknown locale name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown locale: '{0}' (expected 'zh' or 'en')")]
pub struct UnknownLocale(pub String);

impl Locale {
    /// Label for a status; unrecognized values are shown verbatim
    #[must_use]
    pub fn status_label(self, status: &Status) -> Cow<'_, str> {
        let label = match (self, status) {
            (_, Status::Other(raw)) => return Cow::Owned(raw.clone()),
            (Self::Zh, Status::Pending) => "待处理",
            (Self::Zh, Status::InProgress) => "进行中",
            (Self::Zh, Status::Completed) => "已完成",
            (Self::Zh, Status::Cancelled) => "已取消",
            (Self::En, Status::Pending) => "Pending",
            (Self::En, Status::InProgress) => "In progress",
            (Self::En, Status::Completed) => "Completed",
            (Self::En, Status::Cancelled) => "Cancelled",
        };
        Cow::Borrowed(label)
    }

    /// Label for a priority; unrecognized values are shown verbatim
    #[must_use]
    pub fn priority_label(self, priority: &Priority) -> Cow<'_, str> {
        let label = match (self, priority) {
            (_, Priority::Other(raw)) => return Cow::Owned(raw.clone()),
            (Self::Zh, Priority::Low) => "低",
            (Self::Zh, Priority::Medium) => "中",
            (Self::Zh, Priority::High) => "高",
            (Self::Zh, Priority::Urgent) => "紧急",
            (Self::En, Priority::Low) => "Low",
            (Self::En, Priority::Medium) => "Medium",
            (Self::En, Priority::High) => "High",
            (Self::En, Priority::Urgent) => "Urgent",
        };
        Cow::Borrowed(label)
    }

    /// Short locale code
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
