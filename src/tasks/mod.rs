// src/tasks/mod.rs

//! Transform tasks.
//!
//! Each task reads the sources of one asset category, runs them through the
//! delegated compiler, and writes into the category's output directory:
//!
//! - [`markup`]: templates + JSON data → HTML
//! - [`styles`]: SCSS → CSS (media queries grouped, minified or mapped)
//! - [`scripts`]: include-resolved JS → ES2015 (minified or mapped)
//! - [`icons`]: SVG files → one stacked `<symbol>` sprite
//!
//! Tasks are synchronous and CPU-bound. They are called directly by the
//! orchestrator's one-shot sequences and from `spawn_blocking` in watch mode.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::ConfigFile;
use crate::fs::FileSystem;
use crate::types::{AssetCategory, BuildConfig, TaskKind};

pub mod icons;
pub mod include;
pub mod markup;
pub mod media_queries;
pub mod recovery;
pub mod scripts;
pub mod sources;
pub mod styles;

pub use recovery::run_with_recovery;

/// Everything a task invocation needs. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TaskContext {
    pub fs: Arc<dyn FileSystem>,
    pub config: Arc<ConfigFile>,
    pub build: BuildConfig,
}

impl TaskContext {
    pub fn new(fs: Arc<dyn FileSystem>, config: Arc<ConfigFile>, build: BuildConfig) -> Self {
        Self { fs, config, build }
    }

    /// Root-joined output directory of `category`.
    pub fn output_dir(&self, category: AssetCategory) -> Result<PathBuf> {
        let out = self
            .config
            .paths()
            .entry(category)
            .output()
            .with_context(|| format!("category '{category}' has no output directory"))?;
        Ok(self.config.root().join(out))
    }

    /// Root-joined sources of `category`, sorted.
    pub fn sources(&self, category: AssetCategory) -> Result<Vec<PathBuf>> {
        let entry = self.config.paths().entry(category);
        sources::collect_matching(
            self.fs.as_ref(),
            self.config.root(),
            entry.source_patterns(),
            |rel| entry.is_source(rel),
        )
    }
}

/// Files produced by one task run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskReport {
    pub written: Vec<PathBuf>,
}

impl TaskReport {
    pub(crate) fn record(&mut self, path: &Path) {
        self.written.push(path.to_path_buf());
    }
}

/// Run one task to completion without recovery.
pub fn run(kind: TaskKind, ctx: &TaskContext) -> Result<TaskReport> {
    match kind {
        TaskKind::Styles => styles::run(ctx),
        TaskKind::Scripts => scripts::run(ctx),
        TaskKind::Markup => markup::run(ctx),
        TaskKind::Icons => icons::run(ctx),
        TaskKind::Styleguide => crate::styleguide::export(ctx),
    }
}

/// File stem of `path` as UTF-8, or an error naming the file.
pub(crate) fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("no usable file name in {:?}", path))
}
