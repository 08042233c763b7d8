// src/config/validate.rs

use std::path::PathBuf;
use std::str::FromStr;

use crate::config::model::{ConfigFile, RawConfigFile, RawPathEntry};
use crate::config::paths::{PathEntry, PathTable, default_entry};
use crate::errors::{FrontendError, Result};
use crate::fs::FileSystem;
use crate::tasks::sources::collect_matching;
use crate::types::AssetCategory;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::FrontendError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        let paths = build_path_table(&raw)?;
        Ok(ConfigFile::new_unchecked(raw, paths))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_categories(cfg)?;
    validate_server(cfg)?;
    validate_styleguide(cfg)?;
    Ok(())
}

fn validate_categories(cfg: &RawConfigFile) -> Result<()> {
    for name in cfg.paths.keys() {
        AssetCategory::from_str(name).map_err(|e| {
            FrontendError::ConfigError(format!("[paths.{name}]: {e}"))
        })?;
    }
    Ok(())
}

fn validate_server(cfg: &RawConfigFile) -> Result<()> {
    if cfg.server.host.trim().is_empty() {
        return Err(FrontendError::ConfigError(
            "[server].host must not be empty".to_string(),
        ));
    }
    if cfg.server.debounce_ms > 10_000 {
        return Err(FrontendError::ConfigError(format!(
            "[server].debounce_ms must be <= 10000 (got {})",
            cfg.server.debounce_ms
        )));
    }
    Ok(())
}

fn validate_styleguide(cfg: &RawConfigFile) -> Result<()> {
    let sg = &cfg.styleguide;
    if sg.enabled && sg.port == cfg.server.port && sg.port != 0 {
        return Err(FrontendError::ConfigError(format!(
            "[styleguide].port and [server].port must differ (both {})",
            sg.port
        )));
    }
    if sg.dest.trim().is_empty() {
        return Err(FrontendError::ConfigError(
            "[styleguide].dest must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Merge `[paths.*]` overrides over the built-in layout and compile globs.
fn build_path_table(cfg: &RawConfigFile) -> Result<PathTable> {
    let empty = RawPathEntry::default();
    let mut entries = Vec::with_capacity(AssetCategory::ALL.len());

    for category in AssetCategory::ALL {
        let raw = cfg.paths.get(category.as_str()).unwrap_or(&empty);
        let (source, watch, output) = default_entry(category);

        let source = raw.source.clone().unwrap_or(source);
        let watch = raw.watch.clone().unwrap_or(watch);
        let output = raw.output.clone().or(output);

        if source.is_empty() {
            return Err(FrontendError::ConfigError(format!(
                "[paths.{category}].source must contain at least one pattern"
            )));
        }

        let output = match (category, output) {
            (AssetCategory::Data, _) => None,
            (_, Some(dir)) if !dir.trim().is_empty() => Some(PathBuf::from(dir)),
            _ => {
                return Err(FrontendError::ConfigError(format!(
                    "[paths.{category}].output must not be empty"
                )));
            }
        };

        let entry = PathEntry::new(category, source, watch, output)
            .map_err(|e| FrontendError::ConfigError(format!("{e:#}")))?;
        entries.push(entry);
    }

    PathTable::from_entries(entries).map_err(FrontendError::ConfigError)
}

/// Startup checks against the filesystem.
///
/// A missing source root, or data globs that match no file, is a
/// configuration error reported before any task runs.
pub fn validate_project_layout(cfg: &ConfigFile, fs: &dyn FileSystem) -> Result<()> {
    let source_root = cfg.source_root();
    if !fs.is_dir(&source_root) {
        return Err(FrontendError::ConfigError(format!(
            "source directory {:?} does not exist",
            source_root
        )));
    }

    let data = cfg.paths().entry(AssetCategory::Data);
    let patterns = data.source_patterns();
    if !patterns.is_empty() {
        let found = collect_matching(fs, cfg.root(), patterns, |rel| data.is_source(rel))?;
        if found.is_empty() {
            return Err(FrontendError::ConfigError(format!(
                "no data file matches {} under {:?}",
                patterns.join(", "),
                cfg.root()
            )));
        }
    }

    Ok(())
}
