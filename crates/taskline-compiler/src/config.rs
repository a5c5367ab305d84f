//! Compiler configuration
//!
//! Built once at startup from defaults, an optional TOML file and CLI
//! overrides, then handed to every component that needs a path.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use taskline_document::DEFAULT_EXTENSION;
use taskline_render::Locale;

/// Paths and options for a compiler instance
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Directory holding task documents
    pub posts_dir: PathBuf,
    /// Directory the page is written into
    pub output_dir: PathBuf,
    /// File name of the page inside `output_dir`
    pub output_file: String,
    /// Page template
    pub template_path: PathBuf,
    /// Timeline file carrying the diagram source
    pub timeline_path: PathBuf,
    /// Task overview file; watched, never read
    pub task_path: PathBuf,
    /// Document extension (without dot)
    pub document_extension: String,
    /// Quiet period used to coalesce bursts of file events
    pub debounce_ms: u64,
    /// Label language
    pub locale: Locale,
}

impl CompilerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// - `ConfigError::Parse` if the text is not valid for this schema
    /// - `ConfigError::InvalidValue` if a value fails validation
    pub fn from_toml_str(text: &str, origin: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.as_ref().to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - see [`CompilerConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Check values that parse but cannot work
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` naming the first bad field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_file.trim().is_empty() {
            return Err(ConfigError::invalid_value("output_file", "must not be empty"));
        }
        if Path::new(&self.output_file).components().count() != 1 {
            return Err(ConfigError::invalid_value(
                "output_file",
                "must be a plain file name",
            ));
        }
        if self.document_extension.is_empty() || self.document_extension.starts_with('.') {
            return Err(ConfigError::invalid_value(
                "document_extension",
                "must be non-empty and given without a leading dot",
            ));
        }
        Ok(())
    }

    /// Resolve every relative path against `root`
    #[must_use]
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        for path in [
            &mut self.posts_dir,
            &mut self.output_dir,
            &mut self.template_path,
            &mut self.timeline_path,
            &mut self.task_path,
        ] {
            *path = root.join(&*path);
        }
        self
    }

    /// With posts directory
    #[inline]
    #[must_use]
    pub fn with_posts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.posts_dir = dir.into();
        self
    }

    /// With output directory
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// With template path
    #[inline]
    #[must_use]
    pub fn with_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = path.into();
        self
    }

    /// With timeline path
    #[inline]
    #[must_use]
    pub fn with_timeline_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.timeline_path = path.into();
        self
    }

    /// With debounce window in milliseconds
    #[inline]
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// With label locale
    #[inline]
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Full path of the generated page
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    /// Debounce window
    #[inline]
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Files whose changes trigger recompilation (besides `posts_dir`)
    #[must_use]
    pub fn watched_files(&self) -> Vec<PathBuf> {
        vec![
            self.timeline_path.clone(),
            self.task_path.clone(),
            self.template_path.clone(),
        ]
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("post"),
            output_dir: PathBuf::from("dist"),
            output_file: "index.html".to_string(),
            template_path: PathBuf::from("src/template.html"),
            timeline_path: PathBuf::from("config/timeline.md"),
            task_path: PathBuf::from("config/task.md"),
            document_extension: DEFAULT_EXTENSION.to_string(),
            debounce_ms: 150,
            locale: Locale::default(),
        }
    }
}
