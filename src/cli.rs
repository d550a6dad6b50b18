// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `confsync`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "confsync",
    version,
    about = "Render and edit a tuner server's live XML configuration.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CONFSYNC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate the config, print the page layout, touch nothing.
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch the document once and print the rendered table.
    Render {
        /// Render a local XML file instead of fetching from the device.
        #[arg(long, value_name = "FILE")]
        document: Option<PathBuf>,

        /// Write the page to this file instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Fetch the document, set one field's value and post it back.
    Set {
        /// TagPath of the field, e.g. "tuner freq" or "fbc.fbcLinked".
        path: String,

        /// New value as stored in the field's `<value>`.
        value: String,
    },

    /// Poll the device and keep a rendered page up to date.
    Watch {
        /// File the page is (re)written to.
        #[arg(long, value_name = "FILE", default_value = "confsync.html")]
        out: PathBuf,

        /// Read field interactions from stdin (see `console` docs).
        #[arg(long)]
        interactive: bool,
    },
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
