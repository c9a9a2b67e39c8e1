//! Catalog Fetcher CLI application
//!
//! Command-line interface for loading a remote product catalog with its
//! images and reporting when each category is ready.

use std::process;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use catalog_fetcher::cli::{Cli, Commands, handle_config, handle_fetch};
use catalog_fetcher::config::AppConfig;
use catalog_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    let config_source = cli
        .global
        .config
        .clone()
        .or_else(AppConfig::find_config_file);
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &config);

    info!("Catalog Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Fetch(args) => {
            info!("Executing fetch command");
            handle_fetch(args, config, cli.global.quiet).await
        }
        Commands::Config(args) => {
            info!("Executing config command");
            handle_config(args, config, config_source).await
        }
    }
}

/// Initialize logging based on CLI verbosity and the configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let default_level = config
        .logging
        .level
        .parse()
        .unwrap_or(tracing::Level::WARN);
    let log_level = cli.log_level(default_level);

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("catalog_fetcher={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
