//! Document loading from a source directory

use crate::error::{DocumentError, DocumentResult};
use crate::frontmatter::FrontMatter;
use crate::markup::{CommonMarkRenderer, MarkupRenderer};
use crate::record::{format_file_date, sort_by_date_desc, DocumentRecord};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default document extension (without dot)
pub const DEFAULT_EXTENSION: &str = "md";

/// Reads every document in a directory into sorted [`DocumentRecord`]s
///
/// Only regular files directly inside the directory whose extension matches
/// are loaded. Files are enumerated in file-name order, then stably sorted
/// newest first.
#[derive(Clone)]
pub struct DocumentLoader {
    extension: String,
    renderer: Arc<dyn MarkupRenderer>,
}

impl DocumentLoader {
    /// Create loader for `.md` files with the CommonMark renderer
    #[must_use]
    pub fn new() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            renderer: Arc::new(CommonMarkRenderer::new()),
        }
    }

    /// Use a different document extension (without dot)
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Use a different body renderer
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn MarkupRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Document extension this loader accepts
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check if the path has the document extension
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == self.extension)
    }

    /// Identifier for a document path: its file name without the extension
    #[must_use]
    pub fn identifier_for(&self, path: &Path) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = format!(".{}", self.extension);
        match name.strip_suffix(&suffix) {
            Some(stem) => stem.to_string(),
            None => name,
        }
    }

    /// Load all documents from `dir`
    ///
    /// A missing directory yields an empty list. Bytes that are not valid
    /// UTF-8 are replaced with U+FFFD.
    ///
    /// # Errors
    /// - `DocumentError::ListDir` if the directory cannot be listed
    /// - `DocumentError::Io` if a document or its metadata cannot be read
    pub async fn load(&self, dir: &Path) -> DocumentResult<Vec<DocumentRecord>> {
        let paths = match self.list(dir).await {
            Ok(paths) => paths,
            Err(DocumentError::ListDir { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "source directory missing, no documents");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(record) = self.load_one(&path).await? {
                records.push(record);
            }
        }

        sort_by_date_desc(&mut records);
        Ok(records)
    }

    /// Candidate paths in file-name order
    async fn list(&self, dir: &Path) -> DocumentResult<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| DocumentError::list_dir(dir, e))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DocumentError::list_dir(dir, e))?
        {
            let path = entry.path();
            if self.accepts(&path) {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }

    async fn load_one(&self, path: &Path) -> DocumentResult<Option<DocumentRecord>> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| DocumentError::io_error(path, e))?;
        if !metadata.is_file() {
            return Ok(None);
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DocumentError::io_error(path, e))?;
        let raw = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), "document is not valid utf-8, decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        let modified = metadata
            .modified()
            .map_err(|e| DocumentError::io_error(path, e))?;

        let front_matter = FrontMatter::parse(&raw);
        let record = DocumentRecord::from_parts(
            self.identifier_for(path),
            front_matter,
            format_file_date(modified),
            self.renderer.as_ref(),
        );

        tracing::debug!(
            identifier = %record.identifier,
            date = %record.date,
            status = %record.status,
            "loaded document"
        );
        Ok(Some(record))
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DocumentLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentLoader")
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}
