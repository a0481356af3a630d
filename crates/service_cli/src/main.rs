//! bsheat - Black-Scholes prices, Greeks and price heatmaps
//!
//! This is the command-line entry point for the pricing engine.
//!
//! # Commands
//!
//! - `bsheat price` - Price a European call and put
//! - `bsheat greeks --option-type put` - Delta, Gamma, Theta, Vega and Rho
//! - `bsheat surface` - Call and put price heatmaps over spot × volatility
//!
//! Unset inputs come from `bsheat.toml` (or `--config FILE`), then from
//! built-in defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::greeks::GreeksArgs;
use commands::price::PriceArgs;
use commands::surface::SurfaceArgs;
use config::CliConfig;
use error::Result;

/// Black-Scholes option pricing and heatmap CLI
#[derive(Parser)]
#[command(name = "bsheat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BSHEAT_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European call and put
    Price(PriceArgs),

    /// Compute the Greeks of one option
    Greeks(GreeksArgs),

    /// Generate call and put price heatmaps
    Surface(SurfaceArgs),
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    let log_level = config.resolve_log_level(cli.log_level.as_deref())?;
    init_tracing(log_level.as_filter_str());

    info!("bsheat v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "Configuration loaded");

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config),
        Commands::Greeks(args) => commands::greeks::run(args, &config),
        Commands::Surface(args) => commands::surface::run(args, &config),
    }
}
