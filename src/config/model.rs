// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::paths::PathTable;

/// Top-level configuration as read from `Frontend.toml`.
///
/// ```toml
/// source_root = "src"
/// clean = "build"
///
/// [paths.styles]
/// source = ["src/style/main.scss"]
/// watch = ["src/style/**/*.scss"]
/// output = "build/css"
///
/// [server]
/// port = 9000
/// ```
///
/// All sections are optional; anything left out falls back to the built-in
/// layout (`src/` in, `build/` out).
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Root for template lookups (`{% include %}`, styleguide previews).
    #[serde(default = "default_source_root")]
    pub source_root: String,

    /// Directory removed by `frontend clean`.
    #[serde(default = "default_clean")]
    pub clean: String,

    /// Per-category overrides from `[paths.<category>]`.
    ///
    /// Keys must be one of `markup`, `scripts`, `styles`, `icons`, `data`.
    #[serde(default)]
    pub paths: BTreeMap<String, RawPathEntry>,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub styleguide: StyleguideSection,

    #[serde(default)]
    pub notifications: NotificationSection,
}

impl Default for RawConfigFile {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            clean: default_clean(),
            paths: BTreeMap::new(),
            server: ServerSection::default(),
            styleguide: StyleguideSection::default(),
            notifications: NotificationSection::default(),
        }
    }
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_clean() -> String {
    "build".to_string()
}

/// `[paths.<category>]` section. Every field is optional and replaces the
/// built-in value for that category when present.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPathEntry {
    #[serde(default)]
    pub source: Option<Vec<String>>,

    #[serde(default)]
    pub watch: Option<Vec<String>>,

    #[serde(default)]
    pub output: Option<String>,
}

/// `[server]` section: the development server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Quiet period used to batch filesystem events into one rebuild.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_server_port(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_server_port() -> u16 {
    9000
}

fn default_debounce_ms() -> u64 {
    100
}

/// `[styleguide]` section: the component catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleguideSection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_components")]
    pub components: String,

    #[serde(default = "default_docs")]
    pub docs: String,

    #[serde(default = "default_styleguide_dest")]
    pub dest: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_styleguide_port")]
    pub port: u16,
}

impl Default for StyleguideSection {
    fn default() -> Self {
        Self {
            enabled: true,
            components: default_components(),
            docs: default_docs(),
            dest: default_styleguide_dest(),
            host: default_host(),
            port: default_styleguide_port(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_components() -> String {
    "src/components".to_string()
}

fn default_docs() -> String {
    "docs".to_string()
}

fn default_styleguide_dest() -> String {
    "styleguide".to_string()
}

fn default_styleguide_port() -> u16 {
    3000
}

/// `[notifications]` section: how transform failures are surfaced.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSection {
    #[serde(default = "default_title")]
    pub title: String,

    /// Ring the terminal bell on failure.
    #[serde(default = "default_true")]
    pub sound: bool,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            sound: true,
        }
    }
}

fn default_title() -> String {
    "Frontend".to_string()
}

/// Validated configuration.
///
/// Constructed via `TryFrom<RawConfigFile>` (see `validate.rs`); the loader
/// then anchors it at the project root with [`ConfigFile::with_root`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    root: PathBuf,
    source_root: PathBuf,
    clean: PathBuf,
    paths: PathTable,
    server: ServerSection,
    styleguide: StyleguideSection,
    notifications: NotificationSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        raw: RawConfigFile,
        paths: PathTable,
    ) -> Self {
        Self {
            root: PathBuf::from("."),
            source_root: PathBuf::from(raw.source_root),
            clean: PathBuf::from(raw.clean),
            paths,
            server: raw.server,
            styleguide: raw.styleguide,
            notifications: raw.notifications,
        }
    }

    /// Re-anchor all relative paths at `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Project root every configured path is relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn paths(&self) -> &PathTable {
        &self.paths
    }

    /// Absolute (root-joined) template root.
    pub fn source_root(&self) -> PathBuf {
        self.root.join(&self.source_root)
    }

    /// Absolute (root-joined) directory removed by `clean`.
    pub fn clean_dir(&self) -> PathBuf {
        self.root.join(&self.clean)
    }

    pub fn server(&self) -> &ServerSection {
        &self.server
    }

    pub fn styleguide(&self) -> &StyleguideSection {
        &self.styleguide
    }

    pub fn notifications(&self) -> &NotificationSection {
        &self.notifications
    }

    /// Mutable access for callers that override settings after loading
    /// (e.g. tests binding the server to port 0).
    pub fn server_mut(&mut self) -> &mut ServerSection {
        &mut self.server
    }

    pub fn styleguide_mut(&mut self) -> &mut StyleguideSection {
        &mut self.styleguide
    }
}
