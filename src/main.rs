//! hermes - Application Entry Point
//!
//! Renders judge output files as HTML fragments on stdout.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hermes::{
    cli::{self, Cli},
    config::Config,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize tracing; stdout is reserved for rendered output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!(?config, "configuration loaded");

    cli::run(&cli, &config)?;
    Ok(())
}
