//! Taskline Rendering
//!
//! Everything between loaded documents and the final page string. No file
//! I/O happens here: template and timeline text are passed in already read.
//!
//! # Architecture
//!
//! ```text
//! [DocumentRecord] ──→ StatusTally::from_records ──┐
//!        │                                          ├──→ PageRenderer::render(template) → page
//!        └──────────────────────────────────────────┤
//! timeline text ──→ DiagramResolver::resolve ───────┘
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod diagram;
pub mod labels;
pub mod page;
pub mod tally;

pub use diagram::{DiagramResolver, DEFAULT_DIAGRAM, DIAGRAM_LANGUAGE};
pub use labels::{Locale, UnknownLocale};
pub use page::{escape_html, placeholders, substitute, PageRenderer};
pub use tally::StatusTally;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
