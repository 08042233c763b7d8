#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use frontend_build::config::{ConfigFile, RawConfigFile, RawPathEntry};
use frontend_build::fs::{FileSystem, RealFileSystem};
use frontend_build::tasks::TaskContext;
use frontend_build::types::{AssetCategory, BuildConfig};
use tempfile::TempDir;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
    root: PathBuf,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
            root: PathBuf::from("/proj"),
        }
    }

    /// Directory every configured path is relative to.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_source(mut self, category: AssetCategory, patterns: &[&str]) -> Self {
        self.entry(category).source = Some(patterns.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_watch(mut self, category: AssetCategory, patterns: &[&str]) -> Self {
        self.entry(category).watch = Some(patterns.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_output(mut self, category: AssetCategory, output: &str) -> Self {
        self.entry(category).output = Some(output.to_string());
        self
    }

    pub fn with_styleguide(mut self, enabled: bool) -> Self {
        self.config.styleguide.enabled = enabled;
        self
    }

    pub fn raw(&self) -> &RawConfigFile {
        &self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config)
            .expect("Failed to build valid config from builder")
            .with_root(self.root)
    }

    fn entry(&mut self, category: AssetCategory) -> &mut RawPathEntry {
        self.config
            .paths
            .entry(category.as_str().to_string())
            .or_default()
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A project laid out in a temporary directory.
pub struct TempProject {
    dir: TempDir,
}

impl TempProject {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("reading {rel}: {e}"))
    }

    pub fn write(&self, rel: &str, contents: &str) {
        RealFileSystem
            .write(&self.path(rel), contents.as_bytes())
            .unwrap_or_else(|e| panic!("writing {rel}: {e:#}"));
    }

    /// Default configuration rooted at this project.
    pub fn config(&self) -> ConfigFile {
        ConfigFileBuilder::new().root(self.root()).build()
    }

    pub fn context(&self, build: BuildConfig) -> TaskContext {
        TaskContext::new(Arc::new(RealFileSystem), Arc::new(self.config()), build)
    }
}

/// Builder writing source files into a fresh temp directory.
#[derive(Default)]
pub struct ProjectBuilder {
    files: Vec<(String, String)>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, rel: &str, contents: &str) -> Self {
        self.files.push((rel.to_string(), contents.to_string()));
        self
    }

    /// One source of every kind: a page, its data, a stylesheet, a script
    /// and two icons.
    pub fn sample_site(self) -> Self {
        self.file("src/index.twig", "<html><body><h1>{{ title }}</h1></body></html>")
            .file("src/data.json", r#"{"title":"Hi"}"#)
            .file("src/style/main.scss", "body{color:red;}")
            .file("src/js/main.js", "console.log(1)")
            .file(
                "src/svg/a.svg",
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" width="10" height="10"><path d="M0 0h10v10z"/></svg>"#,
            )
            .file(
                "src/svg/b.svg",
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20"><circle cx="10" cy="10" r="5"/></svg>"#,
            )
    }

    pub fn build(self) -> TempProject {
        let dir = tempfile::tempdir().expect("creating temp dir");
        let project = TempProject { dir };
        for (rel, contents) in &self.files {
            project.write(rel, contents);
        }
        project
    }
}
