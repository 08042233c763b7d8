// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::GlobSet;

use crate::config::ConfigFile;
use crate::config::paths::build_globset;
use crate::types::{AssetCategory, TaskKind};

/// Compiled watch patterns bound to the task they re-run.
///
/// The patterns are relative to the project root. The watcher passes
/// relative paths (e.g. `"src/style/_base.scss"`) into `matches`.
#[derive(Clone)]
pub struct WatchRegistration {
    task: TaskKind,
    patterns: Vec<String>,
    watch_set: GlobSet,
}

impl fmt::Debug for WatchRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchRegistration")
            .field("task", &self.task)
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl WatchRegistration {
    pub fn new(task: TaskKind, patterns: Vec<String>) -> Result<Self> {
        let watch_set = build_globset(&patterns)
            .with_context(|| format!("building watch globset for task {task}"))?;
        Ok(Self {
            task,
            patterns,
            watch_set,
        })
    }

    /// Task to re-run when this registration matches.
    pub fn task(&self) -> TaskKind {
        self.task
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        self.watch_set.is_match(rel_path)
    }
}

/// Build the registrations for a development session.
///
/// - each transform category's watch globs → that transform
/// - the data file's watch globs → markup
/// - component templates and docs → styleguide (when enabled)
pub fn build_registrations(cfg: &ConfigFile) -> Result<Vec<WatchRegistration>> {
    let mut registrations = Vec::new();

    for category in AssetCategory::ALL {
        let task = match category {
            AssetCategory::Markup | AssetCategory::Data => TaskKind::Markup,
            AssetCategory::Scripts => TaskKind::Scripts,
            AssetCategory::Styles => TaskKind::Styles,
            AssetCategory::Icons => TaskKind::Icons,
        };
        let patterns = cfg.paths().entry(category).watch_patterns().to_vec();
        if !patterns.is_empty() {
            registrations.push(WatchRegistration::new(task, patterns)?);
        }
    }

    let sg = cfg.styleguide();
    if sg.enabled {
        let components = sg.components.trim_end_matches('/');
        let docs = sg.docs.trim_end_matches('/');
        registrations.push(WatchRegistration::new(
            TaskKind::Styleguide,
            vec![
                format!("{components}/**/*.twig"),
                format!("{components}/**/*.json"),
                format!("{docs}/**/*.md"),
            ],
        )?);
    }

    Ok(registrations)
}
