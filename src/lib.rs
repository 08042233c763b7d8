// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod notifier;
pub mod orchestrator;
pub mod server;
pub mod styleguide;
pub mod tasks;
pub mod types;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, load_or_default};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::notifier::{ConsoleNotifier, Notifier};
use crate::types::{BuildConfig, TaskKind};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (optional `Frontend.toml`)
/// - the console notifier
/// - the sequence or single task selected on the command line
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg: Arc<ConfigFile> = Arc::new(load_or_default(&config_path)?);
    debug!(root = ?cfg.root(), "project root");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier::new(cfg.notifications()));

    let command = args.command.unwrap_or(Command::Dev);
    let (task, single) = match command {
        Command::Dev => return orchestrator::development(fs, cfg, notifier).await,
        Command::Production => {
            orchestrator::production(fs, cfg, notifier).await?;
            return Ok(());
        }
        Command::Clean => return orchestrator::clean(fs.as_ref(), &cfg),
        Command::Styles(a) => (TaskKind::Styles, a),
        Command::Scripts(a) => (TaskKind::Scripts, a),
        Command::Markup(a) => (TaskKind::Markup, a),
        Command::Icons(a) => (TaskKind::Icons, a),
        Command::Styleguide(a) => (TaskKind::Styleguide, a),
    };

    let build = if single.production {
        BuildConfig::production()
    } else {
        BuildConfig::development()
    };
    orchestrator::single(task, fs, cfg, build, notifier).await?;
    Ok(())
}
