// src/config/paths.rs

//! The path table: where each asset category is read from, watched and
//! written to.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::types::AssetCategory;

/// Source/watch/output mapping for one asset category.
///
/// Patterns are relative to the project root and use forward slashes.
#[derive(Debug, Clone)]
pub struct PathEntry {
    category: AssetCategory,
    source: Vec<String>,
    watch: Vec<String>,
    output: Option<PathBuf>,
    source_set: GlobSet,
    watch_set: GlobSet,
}

impl PathEntry {
    pub fn new(
        category: AssetCategory,
        source: Vec<String>,
        watch: Vec<String>,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        let source_set = build_globset(&source)
            .with_context(|| format!("building source globset for {category}"))?;
        let watch_set = build_globset(&watch)
            .with_context(|| format!("building watch globset for {category}"))?;
        Ok(Self {
            category,
            source,
            watch,
            output,
            source_set,
            watch_set,
        })
    }

    pub fn category(&self) -> AssetCategory {
        self.category
    }

    pub fn source_patterns(&self) -> &[String] {
        &self.source
    }

    pub fn watch_patterns(&self) -> &[String] {
        &self.watch
    }

    /// Output directory relative to the project root (`None` for data).
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// True if `rel_path` (relative, forward slashes) is a source file of
    /// this category.
    pub fn is_source(&self, rel_path: &str) -> bool {
        self.source_set.is_match(rel_path)
    }

    /// True if a change at `rel_path` should re-run this category's task.
    pub fn is_watched(&self, rel_path: &str) -> bool {
        self.watch_set.is_match(rel_path)
    }
}

/// One [`PathEntry`] per [`AssetCategory`].
#[derive(Debug, Clone)]
pub struct PathTable {
    entries: BTreeMap<AssetCategory, PathEntry>,
}

impl PathTable {
    /// Build a table, failing unless every category is present exactly once.
    pub fn from_entries(entries: Vec<PathEntry>) -> std::result::Result<Self, String> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let category = entry.category();
            if map.insert(category, entry).is_some() {
                return Err(format!("duplicate path table entry for '{category}'"));
            }
        }
        for category in AssetCategory::ALL {
            if !map.contains_key(&category) {
                return Err(format!("missing path table entry for '{category}'"));
            }
        }
        Ok(Self { entries: map })
    }

    pub fn entry(&self, category: AssetCategory) -> &PathEntry {
        // Presence of every category is checked in `from_entries`.
        &self.entries[&category]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathEntry> {
        self.entries.values()
    }
}

/// Built-in `(source, watch, output)` for a category.
pub fn default_entry(category: AssetCategory) -> (Vec<String>, Vec<String>, Option<String>) {
    let v = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    match category {
        AssetCategory::Markup => (
            v(&["src/*.twig", "src/templates/*.twig"]),
            v(&["src/**/*.twig"]),
            Some("build".to_string()),
        ),
        AssetCategory::Scripts => (
            v(&["src/js/main.js"]),
            v(&["src/js/**/*.js"]),
            Some("build/js".to_string()),
        ),
        AssetCategory::Styles => (
            v(&["src/style/main.scss"]),
            v(&["src/style/**/*.scss"]),
            Some("build/css".to_string()),
        ),
        AssetCategory::Icons => (
            v(&["src/svg/*.svg"]),
            v(&["src/svg/*.svg"]),
            Some("build/assets/icons".to_string()),
        ),
        AssetCategory::Data => (v(&["src/data.json"]), v(&["src/*.json"]), None),
    }
}

/// Build a GlobSet from simple string patterns.
///
/// `*` does not cross `/`, so `src/*.twig` does not match nested templates.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// The leading directory of a pattern that contains no glob syntax.
///
/// `src/style/**/*.scss` → `src/style`, `src/js/main.js` → `src/js/main.js`.
pub fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    for component in pattern.split('/') {
        if component.contains(['*', '?', '[', '{']) {
            break;
        }
        if component.is_empty() || component == "." {
            continue;
        }
        prefix.push(component);
    }
    prefix
}
