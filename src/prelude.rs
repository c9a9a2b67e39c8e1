//! Prelude module for Catalog Fetcher Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use catalog_fetcher::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use catalog_fetcher::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Arc::new(CatalogClient::new()?);
//!     let coordinator =
//!         CatalogCoordinator::new(CoordinatorConfig::default(), client, Arc::new(LoggingObserver));
//!
//!     let result = coordinator.run().await?;
//!     println!("{}", result.stats.summary());
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Essential app components that are used in most integrations
pub use crate::app::{
    // Data types
    Catalog,
    // Client
    CatalogClient,
    // Core orchestration
    CatalogCoordinator,
    CatalogObserver,
    ClientConfig,
    CoordinatorConfig,
    ImageHandle,
    LoggingObserver,
    ModelLoader,
    PipelineStats,
    Product,
    ProductActions,
    ProductInfoHandler,
    ReadySignalPolicy,
    ResourceFetcher,
    SessionResult,
};

// Configuration file support
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{DEFAULT_CATALOG_URL, DEFAULT_RATE_LIMIT_RPS, USER_AGENT};

// Standard library re-exports that are commonly needed
pub use std::sync::Arc;

// Common external crate re-exports for convenience
pub use tokio;
