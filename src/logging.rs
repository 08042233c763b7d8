// src/logging.rs

//! Logging setup for `frontend` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` (applies to this crate; dependencies stay at `warn`)
//! 2. `FRONTEND_LOG`, a full filter directive such as
//!    `info,frontend_build::watch=debug`
//! 3. [`DEFAULT_FILTER`]
//!
//! Output goes to stderr so it never mixes with anything a command prints.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "FRONTEND_LOG";

/// Filter used when neither the flag nor the environment sets one.
pub const DEFAULT_FILTER: &str = "warn,frontend_build=info,frontend=info";

/// Install the global subscriber. Call once, from `main`.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(directive_for(level)),
        None => match std::env::var(LOG_ENV) {
            Ok(value) if !value.trim().is_empty() => EnvFilter::try_new(value.trim()),
            _ => EnvFilter::try_new(DEFAULT_FILTER),
        },
    }
    .with_context(|| format!("invalid log filter (check --log-level or {LOG_ENV})"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))
}

/// Directive that sets this crate to `level` and keeps dependencies quiet.
pub fn directive_for(level: LogLevel) -> String {
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };
    format!("warn,frontend_build={level},frontend={level}")
}
