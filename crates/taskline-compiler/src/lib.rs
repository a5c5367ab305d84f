//! Taskline Compiler
//!
//! Turns a folder of task documents into one dashboard page, once or every
//! time an input changes.
//!
//! # Architecture
//!
//! ```text
//! CompilerConfig ──→ Compiler::compile ──→ dist/index.html
//!                        ↑
//!               ChangeWatcher (notify → re-arm → debounce → compile)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use taskline_compiler::{ChangeWatcher, Compiler, CompilerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let compiler = Compiler::new(CompilerConfig::new().with_root("site"));
//! compiler.bootstrap().await?;
//! let report = compiler.compile().await?;
//! println!("{} documents → {}", report.documents, report.output_path.display());
//!
//! ChangeWatcher::new(compiler).run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod watcher;

pub use compiler::{CompileReport, Compiler, RenderedPage, DEFAULT_TEMPLATE};
pub use config::CompilerConfig;
pub use error::{CompileError, CompileResult, ConfigError, WatchError};
pub use watcher::{ChangeEvent, ChangeKind, ChangeWatcher, Subscription, WatchSummary, WatchTargets};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
