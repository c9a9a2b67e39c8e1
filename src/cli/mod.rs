//! Command-line interface components
//!
//! This module contains CLI-specific code for the Catalog Fetcher application,
//! including argument parsing, the loading indicator and the command handlers.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, ConfigAction, ConfigArgs, FetchArgs, GlobalArgs};
pub use commands::{handle_config, handle_fetch};
pub use progress::{IndicatorState, LoadingIndicator, ProgressConfig};
