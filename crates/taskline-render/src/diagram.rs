//! Timeline diagram source resolution
//!
//! The diagram is passed through uninterpreted. It comes from the first
//! fenced `mermaid` block of the timeline file, else the whole trimmed file,
//! else a built-in one-task chart.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

/// Diagram language tag looked for on fenced code blocks
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

/// Chart used when no timeline file exists
pub const DEFAULT_DIAGRAM: &str = "gantt
    title 任务时间轴
    dateFormat  YYYY-MM-DD
    section 任务
    示例任务 :pending, 2024-01-15, 1d";

/// Resolves diagram source from timeline file contents
#[derive(Debug, Clone)]
pub struct DiagramResolver {
    language: String,
    fallback: String,
}

impl DiagramResolver {
    /// Create resolver for `mermaid` blocks with the built-in fallback chart
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: DIAGRAM_LANGUAGE.to_string(),
            fallback: DEFAULT_DIAGRAM.to_string(),
        }
    }

    /// Look for fenced blocks tagged with another language
    #[inline]
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Use another chart when the timeline file is absent
    #[inline]
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Resolve diagram source
    ///
    /// `timeline` is the timeline file's contents, or `None` if the file does
    /// not exist. Never fails.
    #[must_use]
    pub fn resolve(&self, timeline: Option<&str>) -> String {
        match timeline {
            Some(content) => self
                .extract_block(content)
                .unwrap_or_else(|| content.trim().to_string()),
            None => self.fallback.clone(),
        }
    }

    /// Trimmed content of the first fenced block tagged with the diagram language
    ///
    /// Fences follow CommonMark: a block left unclosed runs to the end of the
    /// file.
    #[must_use]
    pub fn extract_block(&self, content: &str) -> Option<String> {
        let mut current: Option<String> = None;

        for event in Parser::new(content) {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    let tag = info.split_whitespace().next().unwrap_or("");
                    if tag == self.language {
                        current = Some(String::new());
                    }
                }
                Event::Text(text) => {
                    if let Some(ref mut code) = current {
                        code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(code) = current.take() {
                        return Some(code.trim().to_string());
                    }
                }
                _ => {}
            }
        }

        None
    }
}

impl Default for DiagramResolver {
    fn default() -> Self {
        Self::new()
    }
}
