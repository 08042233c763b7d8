// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{FrontendError, Result};

/// File name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "Frontend.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path, validate it and anchor it at the
/// directory containing the file.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config.with_root(config_root_dir(path)))
}

/// Load `path` if it exists; otherwise fall back to the built-in layout
/// rooted at the current directory.
///
/// Only the default file name may be absent. An explicitly named config
/// that does not exist is a configuration error.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();

    if path.exists() {
        info!(config = ?path, "loading configuration");
        return load_and_validate(path);
    }

    if path != Path::new(DEFAULT_CONFIG_FILE) {
        return Err(FrontendError::ConfigError(format!(
            "config file {:?} does not exist",
            path
        )));
    }

    debug!("no {DEFAULT_CONFIG_FILE} found; using built-in paths");
    let config = ConfigFile::try_from(RawConfigFile::default())?;
    Ok(config.with_root(current_dir()))
}

/// Figure out the project root for a config path.
///
/// - If the config path has a non-empty parent (e.g. "site/Frontend.toml"),
///   we use that directory.
/// - If it's just a bare filename, we fall back to the current working
///   directory.
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => current_dir(),
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
