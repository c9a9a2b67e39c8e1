//! Command-line argument parsing for Catalog Fetcher
//!
//! This module defines the CLI structure using clap derive macros,
//! providing a user-friendly interface for loading a product catalog and
//! inspecting the effective configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Catalog Fetcher - Load a remote product catalog with its images
#[derive(Parser, Debug)]
#[command(
    name = "catalog_fetcher",
    version,
    about = "Load a remote product catalog and its images",
    long_about = "Fetches a JSON product catalog, groups products by category and downloads their images.
Reports each category as soon as all of its products have resolved their thumbnail."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the catalog and its images
    Fetch(FetchArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

/// Arguments for the fetch command
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Catalog URL (overrides the configured one)
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Read the catalog document from a local file instead
    #[arg(short, long, value_name = "PATH", conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Announce each category and the catalog at most once
    #[arg(long)]
    pub once: bool,

    /// Print the final catalog as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the details of the named product once loading completes
    #[arg(long, value_name = "NAME")]
    pub details: Option<String>,

    /// Hand the named product's model to the AR loader once loading completes
    #[arg(long, value_name = "NAME")]
    pub ar: Option<String>,
}

/// Arguments for configuration inspection
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print where configuration is read from
    Path,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    ///
    /// `default` applies when no verbosity flag is given.
    pub fn log_level(&self, default: tracing::Level) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            default
        }
    }
}

impl FetchArgs {
    /// Check for values clap cannot reject on its own
    pub fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.url {
            if url.trim().is_empty() {
                return Err("Catalog URL cannot be empty".to_string());
            }
        }

        for name in [&self.details, &self.ar].into_iter().flatten() {
            if name.trim().is_empty() {
                return Err("Product name cannot be empty".to_string());
            }
        }

        Ok(())
    }
}
