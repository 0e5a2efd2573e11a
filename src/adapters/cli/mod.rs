//! CLI Adapter
//!
//! Command-line interface for the Maximus dashboard backend.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{
    format_report, resolve_config, CliApp, ResolvedConfig, Command, ServeCmd, SnapshotCmd, SpotCmd, WatchCmd,
    DEFAULT_CONFIG_PATH,
};

use anyhow::Result;

use crate::config::Config;

/// Execute the CLI command
pub async fn execute(command: Command, config: Config) -> Result<()> {
    commands::execute(command, config).await
}
