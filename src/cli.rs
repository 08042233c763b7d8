// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `frontend`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "frontend",
    version,
    about = "Build templates, styles, scripts and icons; serve them with live reload.",
    long_about = None
)]
pub struct CliArgs {
    /// What to run. Defaults to the development sequence.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the config file (TOML).
    ///
    /// The file is optional when left at its default; built-in paths are used
    /// and the current directory is the project root.
    #[arg(long, global = true, value_name = "PATH", default_value = "Frontend.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FRONTEND_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build everything once, start the dev server and watch for changes.
    Dev,
    /// Minified build without source maps, then export the styleguide.
    Production,
    /// Delete the build output tree.
    Clean,
    /// Compile stylesheets once.
    Styles(SingleTaskArgs),
    /// Bundle scripts once.
    Scripts(SingleTaskArgs),
    /// Render templates once.
    Markup(SingleTaskArgs),
    /// Pack the SVG sprite once.
    Icons(SingleTaskArgs),
    /// Export the styleguide once.
    Styleguide(SingleTaskArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SingleTaskArgs {
    /// Build in production mode (minified, no source maps).
    #[arg(long)]
    pub production: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
