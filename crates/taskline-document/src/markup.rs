//! Markdown body rendering
//!
//! Uses pulldown-cmark for CommonMark plus the GitHub extensions authors
//! usually expect (tables, strikethrough, task lists).

use pulldown_cmark::{html, Options, Parser};

/// Converts document body text into an HTML fragment
///
/// Implementations must be pure: same input, same output.
pub trait MarkupRenderer: Send + Sync {
    /// Render body text to HTML
    fn render(&self, body: &str) -> String;
}

/// CommonMark renderer backed by pulldown-cmark
#[derive(Debug, Clone, Copy)]
pub struct CommonMarkRenderer {
    options: Options,
}

impl CommonMarkRenderer {
    /// Create renderer with GitHub-flavoured extensions enabled
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }

    /// Create renderer with explicit pulldown-cmark options
    #[inline]
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl Default for CommonMarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupRenderer for CommonMarkRenderer {
    fn render(&self, body: &str) -> String {
        let parser = Parser::new_ext(body, self.options);
        let mut out = String::with_capacity(body.len() + body.len() / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_paragraphs_and_headings() {
        let html = CommonMarkRenderer::new().render("# Plan\n\nShip **v1**.\n");
        assert_eq!(html, "<h1>Plan</h1>\n<p>Ship <strong>v1</strong>.</p>\n");
    }

    #[test]
    fn renders_tables() {
        let html = CommonMarkRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn strikethrough_needs_extension() {
        let plain = CommonMarkRenderer::with_options(Options::empty()).render("~~old~~");
        let gfm = CommonMarkRenderer::new().render("~~old~~");

        assert!(!plain.contains("<del>"));
        assert!(gfm.contains("<del>old</del>"));
    }

    #[test]
    fn empty_body_renders_nothing() {
        assert_eq!(CommonMarkRenderer::new().render(""), "");
    }
}
