use crate::app_config::AppConfig;
use crate::cli::Cli;
use crate::notice::Notice;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_config;
mod cli;
mod domain;
mod filter;
mod notice;
mod portal;
mod render;
mod session;
mod validation;
mod workflow;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    debug!("✅  Loaded configuration, using API at '{}'", config.api().base_url());

    match cli::run(cli, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            Notice::error(err.user_message()).emit();
            Ok(ExitCode::FAILURE)
        }
    }
}
