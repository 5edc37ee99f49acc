//! Salient CLI - benchmark client and dataset tools
//!
//! A command-line companion to the Salient server: an HTTP benchmark
//! client, a synthetic dataset generator, and artifact inspection.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

mod commands;
mod config;
mod utils;

use commands::{benchmark::BenchmarkCommand, generate::GenerateCommand, info::InfoCommand, Command};

#[derive(Parser)]
#[command(
    name = "salient",
    version = env!("CARGO_PKG_VERSION"),
    about = "Salient prediction service CLI",
    long_about = "Benchmark a running Salient server, generate synthetic sales datasets, and inspect serialized model artifacts."
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SALIENT_CONFIG")]
    config: Option<PathBuf>,

    /// JSON output format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Benchmark a running server over HTTP
    #[command(name = "benchmark", alias = "bench", alias = "b")]
    Benchmark(BenchmarkCommand),

    /// Generate a synthetic sales dataset
    #[command(name = "generate", alias = "gen", alias = "g")]
    Generate(GenerateCommand),

    /// Display artifact information
    #[command(name = "info", alias = "i")]
    Info(InfoCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    debug!("Salient CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load(cli.config.as_deref())?;
    debug!("Configuration loaded: {:?}", config);

    let result = match cli.command {
        Commands::Benchmark(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Generate(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Info(cmd) => cmd.execute(&config, cli.json).await,
    };

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
