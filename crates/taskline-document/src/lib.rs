//! Taskline Documents
//!
//! Task documents are Markdown files with an optional YAML front-matter
//! header. This crate turns a directory of them into normalized, sorted
//! [`DocumentRecord`]s.
//!
//! # Pipeline
//!
//! ```text
//! post/*.md → FrontMatter::parse → DocumentRecord::from_parts → sort_by_date_desc
//!                                        ↑
//!                                  MarkupRenderer (body → HTML)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use taskline_document::DocumentLoader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let records = DocumentLoader::new().load("post".as_ref()).await?;
//! for record in &records {
//!     println!("{} {} [{}]", record.date, record.title, record.status);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod frontmatter;
pub mod loader;
pub mod markup;
pub mod record;

pub use error::{DocumentError, DocumentResult};
pub use frontmatter::FrontMatter;
pub use loader::{DocumentLoader, DEFAULT_EXTENSION};
pub use markup::{CommonMarkRenderer, MarkupRenderer};
pub use record::{format_file_date, parse_sort_date, sort_by_date_desc, DocumentRecord, Priority, Status};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
