//! Strictly Go - GTP referee

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use strictly_go::{Color, EngineProcess, MatchConfig, Orchestrator};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    let config = load_config(cli)?;
    let report = run_match(config).await.context("Error when playing game")?;

    println!("Black: {}", report.black_score());
    println!("White: {}", report.white_score());
    Ok(())
}

#[instrument(skip(cli))]
fn load_config(cli: Cli) -> Result<MatchConfig> {
    let base = match &cli.config {
        Some(path) => MatchConfig::from_file(path)
            .with_context(|| format!("Error loading {}", path.display()))?,
        None => MatchConfig::default(),
    };
    let config = base.with_overrides(cli.black, cli.white, cli.boardsize, cli.komi);
    config.validate().context("Invalid match configuration")?;
    Ok(config)
}

#[instrument(skip(config))]
async fn run_match(config: MatchConfig) -> Result<strictly_go::GameReport> {
    let black = EngineProcess::new("black", config.engine_command(Color::Black)?);
    let white = EngineProcess::new("white", config.engine_command(Color::White)?);
    info!(black = %black.command(), white = %white.command(), "Creating game");

    let orchestrator = Orchestrator::new(Box::new(black), Box::new(white), config.settings().clone());
    Ok(orchestrator.run().await?)
}

fn initialize_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,strictly_go=debug"
    } else {
        "info,strictly_go=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
