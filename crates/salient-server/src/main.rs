//! Salient Server - HTTP prediction and explanation API
//!
//! This binary serves a pretrained sales regression model and its
//! additive explainer over HTTP, with a cached explanation path and an
//! in-process performance comparison.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use salient_core::metrics::TrackingAllocator;
use salient_server::{
    config::ServerConfig,
    error::ServerResult,
    server::{run_server, SalientServer},
};

// Peak-memory figures in responses come from this allocator.
#[global_allocator]
static ALLOCATOR: TrackingAllocator = TrackingAllocator;

/// Command line arguments
#[derive(Parser)]
#[command(
    name = "salient-server",
    about = "Salient prediction and explanation HTTP server",
    long_about = "Serves a pretrained tabular regression model and its additive explainer over HTTP, with an in-memory cache for explanation results and an in-process performance comparison across serving modes."
)]
struct Args {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    bind: String,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable compact logging
    #[arg(long)]
    compact_logs: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Start,
    /// Generate a default configuration file
    Config {
        /// Output file path
        #[arg(short, long, default_value = "salient-server.toml")]
        output: PathBuf,
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate configuration file
    Validate {
        /// Configuration file to validate
        config: PathBuf,
    },
    /// Show server information
    Info,
}

#[tokio::main]
async fn main() -> ServerResult<()> {
    let args = Args::parse();

    init_logging(&args)?;

    match args.command {
        Some(Commands::Start) | None => start_server(args).await,
        Some(Commands::Config { output, force }) => generate_config(output, force).await,
        Some(Commands::Validate { config }) => validate_config(config).await,
        Some(Commands::Info) => show_info().await,
    }
}

/// Initialize logging based on command line arguments
fn init_logging(args: &Args) -> ServerResult<()> {
    let log_level = args.log_level.parse::<Level>().map_err(|_| {
        salient_server::error::ServerError::Config(format!(
            "Invalid log level: {}",
            args.log_level
        ))
    })?;

    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("salient_server={}", log_level).parse().unwrap())
        .add_directive(format!("salient_core={}", log_level).parse().unwrap())
        .add_directive(format!("salient_model={}", log_level).parse().unwrap());

    if args.compact_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().compact())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().pretty())
            .with(env_filter)
            .init();
    }

    Ok(())
}

/// Start the server
async fn start_server(args: Args) -> ServerResult<()> {
    info!("Starting Salient Server v{}", salient_server::VERSION);

    let mut config = if let Some(config_path) = args.config {
        info!("Loading configuration from: {:?}", config_path);
        ServerConfig::from_file(&config_path).map_err(|e| {
            salient_server::error::ServerError::Config(format!("Failed to load config: {}", e))
        })?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    // Override bind address from command line if provided
    if args.bind != "127.0.0.1:8000" {
        config.bind = args.bind.parse().map_err(|e| {
            salient_server::error::ServerError::Config(format!("Invalid bind address: {}", e))
        })?;
    }

    let server = SalientServer::new(config)?;

    info!("Server configuration:");
    info!("  Bind address: {}", server.config().bind);
    info!("  Model: {:?}", server.config().artifacts.model_path);
    info!("  Explainer: {:?}", server.config().artifacts.explainer_path);
    info!("  Cache bound: {} entries", server.config().cache.max_entries);
    info!(
        "  Results file: {:?}",
        server.config().performance.results_path
    );

    run_server(server).await
}

/// Generate a default configuration file
async fn generate_config(output: PathBuf, force: bool) -> ServerResult<()> {
    if output.exists() && !force {
        error!("Configuration file already exists: {:?}", output);
        error!("Use --force to overwrite");
        return Err(salient_server::error::ServerError::Config(
            "Configuration file already exists".to_string(),
        ));
    }

    let config = ServerConfig::default();
    config.to_file(&output).map_err(|e| {
        salient_server::error::ServerError::Config(format!("Failed to write config: {}", e))
    })?;

    info!("Generated default configuration file: {:?}", output);
    Ok(())
}

/// Validate a configuration file
async fn validate_config(config_path: PathBuf) -> ServerResult<()> {
    info!("Validating configuration file: {:?}", config_path);

    match ServerConfig::from_file(&config_path) {
        Ok(config) => {
            info!("Configuration is valid");
            info!("  Bind address: {}", config.bind);
            info!("  Model: {:?}", config.artifacts.model_path);
            info!("  Cache bound: {} entries", config.cache.max_entries);
            Ok(())
        }
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            Err(salient_server::error::ServerError::Config(format!(
                "Invalid configuration: {}",
                e
            )))
        }
    }
}

/// Show server information
async fn show_info() -> ServerResult<()> {
    println!("Salient Server v{}", salient_server::VERSION);
    println!("HTTP prediction and explanation API for a pretrained tabular regression model");
    println!();
    println!("Endpoints:");
    println!("  POST /predict                     prediction only");
    println!("  POST /predict_with_shap           prediction + cached explanation");
    println!("  POST /predict_with_shap_no_cache  prediction + recomputed explanation");
    println!("  POST /performance_test            compare the three modes");
    println!("  POST /clear_cache                 drop all cached explanations");
    println!("  GET  /health                      service health");
    println!();
    println!("Configuration:");
    println!("  • Default bind address: 127.0.0.1:8000");
    println!("  • Default artifacts directory: ./artifacts");
    println!("  • Configuration file: salient-server.toml");
    println!();
    println!("Usage:");
    println!("  salient-server                      # Start with default config");
    println!("  salient-server -c config.toml       # Start with custom config");
    println!("  salient-server config               # Generate default config");
    println!("  salient-server validate config.toml # Validate config file");

    Ok(())
}
