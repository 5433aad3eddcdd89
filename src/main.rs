use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod core;
mod error;

use cli::Cli;
use config::Config;
use crate::core::Engine;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .init();

    let cli = Cli::parse();

    debug!("Starting latexchanges v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let work_dir = std::env::current_dir().context("cannot determine working directory")?;
    let engine = Engine::new(config, work_dir);

    let outcome = cli.execute(engine).await?;
    debug!(
        "Ran {} step(s), predecessor {:?}",
        outcome.pipeline.steps.len(),
        outcome.predecessor
    );
    let code = outcome.exit_code();
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

/// `RUST_LOG` directives on top of an INFO default
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}
