//! CLI Command Handlers
//!
//! Implementation of all CLI commands for the Maximus intel dashboard.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use crate::adapters::server::DashboardServer;
use crate::adapters::snapshot::KNOWN_SNAPSHOTS;
use crate::application::{Dashboard, ReportOutcome, ReportWatcher, SourceReport};
use crate::config::{load_config, Config};

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config/maximus.toml";

/// Maximus - multi-source intel dashboard backend
#[derive(Parser, Debug)]
#[command(
    name = "maximus-intel",
    version = env!("CARGO_PKG_VERSION"),
    about = "Multi-source intel feeds for the Maximus dashboard",
    long_about = "Maximus pulls token pairs, ammunition prices, marketplace listings, \
                  spot prices and collector snapshots, and serves them to the dashboard."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dashboard HTTP API
    Serve(ServeCmd),

    /// Scan DexScreener for fresh liquid pairs
    Alpha,

    /// Fetch the lowest listed price per caliber
    Ammo,

    /// Scan the forum marketplace for gear listings
    Gear,

    /// Fetch a spot price in USD
    Spot(SpotCmd),

    /// Print a collector snapshot
    Snapshot(SnapshotCmd),

    /// Report on every source once
    Report,

    /// Report on every source repeatedly until Ctrl+C
    Watch(WatchCmd),
}

/// Serve the HTTP API
#[derive(Parser, Debug)]
pub struct ServeCmd {
    /// Override the configured bind address
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,
}

/// Fetch one spot price
#[derive(Parser, Debug)]
pub struct SpotCmd {
    /// CoinGecko asset id (defaults to the configured asset)
    pub asset: Option<String>,
}

/// Print one snapshot
#[derive(Parser, Debug)]
pub struct SnapshotCmd {
    /// Snapshot name, e.g. status, task or feed
    pub name: String,
}

/// Repeated reporting
#[derive(Parser, Debug)]
pub struct WatchCmd {
    /// Seconds between report cycles
    #[arg(short, long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
}

/// Configuration for a run and the file it came from
#[derive(Debug)]
pub struct ResolvedConfig {
    pub config: Config,
    /// `None` when built-in defaults are in use
    pub path: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Log where the configuration came from; call once logging is up
    pub fn log_source(&self) {
        match &self.path {
            Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
            None => tracing::debug!("No config at {}, using defaults", DEFAULT_CONFIG_PATH),
        }
    }
}

/// Resolve configuration for a run
///
/// An explicit path must load. Without one, the default path is used when
/// present and built-in defaults otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    if let Some(path) = explicit {
        let config = load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        return Ok(ResolvedConfig {
            config,
            path: Some(path.to_path_buf()),
        });
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        let config = load_config(default_path).context("Failed to load configuration")?;
        return Ok(ResolvedConfig {
            config,
            path: Some(default_path.to_path_buf()),
        });
    }

    let config = Config::default();
    config.validate()?;
    Ok(ResolvedConfig { config, path: None })
}

/// Execute the parsed command against a loaded configuration
pub async fn execute(command: Command, config: Config) -> Result<()> {
    let dashboard = Dashboard::from_config(&config).context("Failed to build dashboard")?;

    match command {
        Command::Serve(cmd) => serve_command(cmd, dashboard, &config).await,
        Command::Alpha => print_json(&dashboard.alpha().await?),
        Command::Ammo => print_json(&dashboard.ammo().await),
        Command::Gear => print_json(&dashboard.gear().await?),
        Command::Spot(cmd) => print_json(&dashboard.spot(cmd.asset.as_deref()).await?),
        Command::Snapshot(cmd) => print_json(&dashboard.snapshot(&cmd.name).await),
        Command::Report => report_command(dashboard).await,
        Command::Watch(cmd) => watch_command(cmd, dashboard).await,
    }
}

async fn serve_command(cmd: ServeCmd, dashboard: Dashboard, config: &Config) -> Result<()> {
    let bind_addr = cmd.bind.unwrap_or_else(|| config.server.get_bind_addr());
    tracing::info!("Starting Maximus dashboard server on {}", bind_addr);

    let server = DashboardServer::new(Arc::new(dashboard), bind_addr);
    server
        .run(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await
}

async fn report_command(dashboard: Dashboard) -> Result<()> {
    let reports = dashboard.report_all().await;
    print_reports(&reports);

    for name in KNOWN_SNAPSHOTS {
        let summary = match dashboard.snapshot(name).await {
            Value::Array(items) => format!("{:>3} items", items.len()),
            _ => "document".to_string(),
        };
        println!("{:<10} {}  ({})", name, summary, dashboard.snapshot_reader().dir().display());
    }
    Ok(())
}

async fn watch_command(cmd: WatchCmd, dashboard: Dashboard) -> Result<()> {
    let watcher = ReportWatcher::new(dashboard, Duration::from_secs(cmd.interval));

    let handle = watcher.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
        handle.stop().await;
    });

    watcher.run(print_reports).await;
    Ok(())
}

fn print_reports(reports: &[SourceReport]) {
    for report in reports {
        println!("{}", format_report(report));
    }
}

/// One status line per source
pub fn format_report(report: &SourceReport) -> String {
    let fetched = report.fetched_at.format("%H:%M:%S");
    match &report.outcome {
        ReportOutcome::Ok { records, degraded: 0 } => format!(
            "{:<10} OK     {:>3} records  {:>5}ms  at {}",
            report.source, records, report.elapsed_ms, fetched
        ),
        ReportOutcome::Ok { records, degraded } => format!(
            "{:<10} DEGRADED {:>3} records ({} ERR)  {:>5}ms  at {}",
            report.source, records, degraded, report.elapsed_ms, fetched
        ),
        ReportOutcome::Failed { cause } => format!(
            "{:<10} FAILED {}  {:>5}ms  at {}",
            report.source, cause, report.elapsed_ms, fetched
        ),
    }
}

fn print_json<T: Serialize>(payload: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(payload).context("Failed to render JSON")?;
    println!("{}", rendered);
    Ok(())
}
