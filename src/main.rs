//! Maximus Intel - dashboard backend binary

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use maximus::adapters::cli::{self, CliApp};
use maximus::config::LoggingSection;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    let resolved = cli::resolve_config(app.config.as_deref())?;
    init_logging(app.verbose, app.debug, &resolved.config.logging)?;
    resolved.log_source();

    cli::execute(app.command, resolved.config).await
}

fn init_logging(verbose: bool, debug: bool, logging: &LoggingSection) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    if logging.json {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }
    Ok(())
}
