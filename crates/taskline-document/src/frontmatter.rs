//! YAML front-matter splitting
//!
//! A document carries a header only when its first line is `---`. The header
//! runs until the next `---` (or `...`) line and must be a YAML mapping;
//! anything else leaves the whole text as body with no attributes.

use serde_yaml::{Mapping, Value};

const OPEN_DELIMITER: &str = "---";
const CLOSE_DELIMITERS: [&str; 2] = ["---", "..."];

/// Document split into header attributes and remaining body text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontMatter {
    /// Header attributes (empty if the document has no usable header)
    pub attributes: Mapping,
    /// Text after the header block
    pub body: String,
}

impl FrontMatter {
    /// Split raw document text into attributes and body
    ///
    /// Never fails: a malformed header is logged and treated as absent.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some((header, body)) = split_header(content) else {
            return Self::body_only(content);
        };

        if header.trim().is_empty() {
            return Self {
                attributes: Mapping::new(),
                body: body.to_string(),
            };
        }

        match serde_yaml::from_str::<Value>(header) {
            Ok(Value::Mapping(attributes)) => Self {
                attributes,
                body: body.to_string(),
            },
            Ok(other) => {
                tracing::warn!(kind = value_kind(&other), "front-matter is not a mapping, ignoring header");
                Self::body_only(content)
            }
            Err(e) => {
                tracing::warn!(error = %e, "malformed front-matter, ignoring header");
                Self::body_only(content)
            }
        }
    }

    /// Look up a header attribute as display text
    ///
    /// Strings are returned as-is, numbers and booleans are stringified.
    /// Empty strings, nulls, sequences and mappings count as absent.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Whether the document carried any header attributes
    #[inline]
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    fn body_only(content: &str) -> Self {
        Self {
            attributes: Mapping::new(),
            body: content.to_string(),
        }
    }
}

/// Locate the header block, returning `(header, body)`
fn split_header(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != OPEN_DELIMITER {
        return None;
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        let line_end = offset + line.len();
        if CLOSE_DELIMITERS.contains(&line.trim_end()) {
            return Some((&content[header_start..offset], &content[line_end..]));
        }
        offset = line_end;
    }

    None
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
