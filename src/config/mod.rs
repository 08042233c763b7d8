// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Build the per-category path table (`paths.rs`).
//! - Load a config file from disk, or fall back to defaults (`loader.rs`).
//! - Validate settings and the project layout (`validate.rs`).

pub mod loader;
pub mod model;
pub mod paths;
pub mod validate;

pub use loader::{DEFAULT_CONFIG_FILE, load_and_validate, load_from_path, load_or_default};
pub use model::{
    ConfigFile, NotificationSection, RawConfigFile, RawPathEntry, ServerSection,
    StyleguideSection,
};
pub use paths::{PathEntry, PathTable};
pub use validate::validate_project_layout;
