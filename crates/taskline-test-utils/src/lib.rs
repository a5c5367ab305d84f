//! Testing utilities for the Taskline workspace
//!
//! A [`Project`] is a throwaway directory laid out like a real site:
//! `post/`, `config/timeline.md`, `src/template.html` and `dist/`.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use taskline_compiler::{Compiler, CompilerConfig};
use tempfile::TempDir;

pub struct Project {
    dir: TempDir,
    config: CompilerConfig,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = CompilerConfig::new().with_root(dir.path());
        Self { dir, config }
    }

    pub fn with_config(mut self, f: impl FnOnce(CompilerConfig) -> CompilerConfig) -> Self {
        self.config = f(self.config);
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn compiler(&self) -> Compiler {
        Compiler::new(self.config.clone())
    }

    pub fn write_post(&self, name: &str, content: &str) -> PathBuf {
        write(&self.config.posts_dir.join(name), content)
    }

    /// Write a post and pin its modification time
    pub fn write_post_modified(&self, name: &str, content: &str, unix_secs: u64) -> PathBuf {
        let path = self.write_post(name, content);
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(unix_secs))
            .unwrap();
        path
    }

    pub fn remove_post(&self, name: &str) {
        std::fs::remove_file(self.config.posts_dir.join(name)).unwrap();
    }

    pub fn write_timeline(&self, content: &str) -> PathBuf {
        write(&self.config.timeline_path, content)
    }

    pub fn write_template(&self, content: &str) -> PathBuf {
        write(&self.config.template_path, content)
    }

    pub fn output_path(&self) -> PathBuf {
        self.config.output_path()
    }

    pub fn output(&self) -> String {
        std::fs::read_to_string(self.output_path()).unwrap()
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
    path.to_path_buf()
}
