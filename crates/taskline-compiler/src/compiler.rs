//! Compilation orchestrator
//!
//! Runs one full compilation: load documents, read the template and timeline
//! file, render, write. All file I/O of a run happens here; the document
//! loader is the only other component that touches the disk.

use crate::config::CompilerConfig;
use crate::error::{CompileError, CompileResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use taskline_document::{DocumentLoader, DocumentRecord};
use taskline_render::{DiagramResolver, PageRenderer, StatusTally};

/// Template used when the configured template file does not exist
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/template.html");

/// Summary of a successful compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    /// Number of documents rendered
    pub documents: usize,
    /// Status counts
    pub tally: StatusTally,
    /// Where the page was written
    pub output_path: PathBuf,
    /// Page size in bytes
    pub bytes: usize,
}

/// Page produced by a compilation, before it is written
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Loaded documents in display order
    pub records: Vec<DocumentRecord>,
    /// Status counts
    pub tally: StatusTally,
    /// Resolved diagram source
    pub diagram: String,
    /// Final page text
    pub html: String,
}

/// Compiles the documents of one project into its dashboard page
///
/// Holds no state between runs; every call to [`Compiler::compile`] starts
/// from scratch.
#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    loader: DocumentLoader,
    resolver: DiagramResolver,
    renderer: PageRenderer,
}

impl Compiler {
    /// Create compiler from configuration
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        let loader = DocumentLoader::new().with_extension(config.document_extension.clone());
        let renderer = PageRenderer::new(config.locale);
        Self {
            config,
            loader,
            resolver: DiagramResolver::new(),
            renderer,
        }
    }

    /// Replace the document loader
    #[must_use]
    pub fn with_loader(mut self, loader: DocumentLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Replace the diagram resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: DiagramResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Create the posts and output directories if missing
    ///
    /// # Errors
    /// `CompileError::Write` if a directory cannot be created
    pub async fn bootstrap(&self) -> CompileResult<()> {
        for dir in [&self.config.posts_dir, &self.config.output_dir] {
            if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| CompileError::write_error(dir, e))?;
                tracing::info!(dir = %dir.display(), "created directory");
            }
        }
        Ok(())
    }

    /// Load, tally and render without writing anything
    ///
    /// # Errors
    /// - `CompileError::Documents` if the documents cannot be loaded
    /// - `CompileError::Read` if the template or timeline file exists but
    ///   cannot be read
    pub async fn render(&self) -> CompileResult<RenderedPage> {
        let records = self.loader.load(&self.config.posts_dir).await?;
        tracing::info!(documents = records.len(), dir = %self.config.posts_dir.display(), "found documents");

        let template = match read_optional(&self.config.template_path).await? {
            Some(template) => template,
            None => {
                tracing::warn!(
                    path = %self.config.template_path.display(),
                    "template not found, using built-in template"
                );
                DEFAULT_TEMPLATE.to_string()
            }
        };

        let timeline = read_optional(&self.config.timeline_path).await?;
        let diagram = self.resolver.resolve(timeline.as_deref());

        let tally = StatusTally::from_records(&records);
        tracing::info!(
            pending = tally.pending,
            in_progress = tally.in_progress,
            completed = tally.completed,
            cancelled = tally.cancelled,
            total = tally.total,
            "status tally"
        );

        let html = self.renderer.render(&template, &records, &diagram, &tally);

        Ok(RenderedPage {
            records,
            tally,
            diagram,
            html,
        })
    }

    /// Run one full compilation and write the page
    ///
    /// The page is written to a temporary sibling and renamed into place, so a
    /// failed run leaves the previous output untouched.
    ///
    /// # Errors
    /// - see [`Compiler::render`]
    /// - `CompileError::Write` if the output cannot be written
    pub async fn compile(&self) -> CompileResult<CompileReport> {
        let started = Instant::now();
        tracing::info!("compiling");

        let page = self.render().await?;
        let output_path = self.config.output_path();
        write_atomic(&output_path, page.html.as_bytes()).await?;

        let report = CompileReport {
            documents: page.records.len(),
            tally: page.tally,
            output_path,
            bytes: page.html.len(),
        };
        tracing::info!(
            output = %report.output_path.display(),
            bytes = report.bytes,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "compilation finished"
        );
        Ok(report)
    }

    /// Run [`Compiler::compile`], logging instead of returning failures
    ///
    /// Returns `None` if the run failed.
    pub async fn compile_logged(&self) -> Option<CompileReport> {
        match self.compile().await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!(error = %e, "compilation failed, previous output kept");
                None
            }
        }
    }
}

/// Read a text file, treating absence as `None`
async fn read_optional(path: &Path) -> CompileResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CompileError::read_error(path, e)),
    }
}

/// Write through a temporary file and rename over `path`
async fn write_atomic(path: &Path, bytes: &[u8]) -> CompileResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CompileError::write_error(parent, e))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, bytes)
        .await
        .map_err(|e| CompileError::write_error(&tmp_path, e))?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(CompileError::write_error(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taskline_render::{placeholders, DEFAULT_DIAGRAM};
    use tempfile::TempDir;

    fn project() -> (TempDir, Compiler) {
        let dir = TempDir::new().unwrap();
        let compiler = Compiler::new(CompilerConfig::new().with_root(dir.path()));
        (dir, compiler)
    }

    #[test]
    fn default_template_has_every_placeholder() {
        for name in placeholders::ALL {
            assert!(
                DEFAULT_TEMPLATE.contains(&format!("{{{{{name}}}}}")),
                "built-in template lacks {name}"
            );
        }
    }

    #[tokio::test]
    async fn bootstrap_creates_directories() {
        let (dir, compiler) = project();
        compiler.bootstrap().await.unwrap();

        assert!(dir.path().join("post").is_dir());
        assert!(dir.path().join("dist").is_dir());
    }

    #[tokio::test]
    async fn empty_project_compiles_with_defaults() {
        let (_dir, compiler) = project();

        let report = compiler.compile().await.unwrap();
        let html = std::fs::read_to_string(&report.output_path).unwrap();

        assert_eq!(report.documents, 0);
        assert_eq!(report.tally, StatusTally::default());
        assert!(html.contains(DEFAULT_DIAGRAM));
        assert!(!html.contains("{{"));
        assert_eq!(report.bytes, html.len());
    }

    #[tokio::test]
    async fn render_does_not_write() {
        let (_dir, compiler) = project();

        let page = compiler.render().await.unwrap();

        assert_eq!(page.diagram, DEFAULT_DIAGRAM);
        assert!(!compiler.config().output_path().exists());
    }

    #[tokio::test]
    async fn write_atomic_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/index.html");

        write_atomic(&path, b"first").await.unwrap();
        write_atomic(&path, b"second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!dir.path().join("out/index.html.tmp").exists());
    }

    #[tokio::test]
    async fn unreadable_template_fails_without_touching_output() {
        let (dir, compiler) = project();
        compiler.compile().await.unwrap();
        let before = std::fs::read_to_string(compiler.config().output_path()).unwrap();

        // A directory where the template should be cannot be read as text.
        std::fs::create_dir_all(dir.path().join("src/template.html")).unwrap();

        assert!(compiler.compile_logged().await.is_none());
        let after = std::fs::read_to_string(compiler.config().output_path()).unwrap();
        assert_eq!(before, after);
    }
}
