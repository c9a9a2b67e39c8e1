//! Core application logic for Catalog Fetcher
//!
//! This module contains the main application components including the HTTP client,
//! catalog decoding and storage, image retrieval, completion tracking and the
//! presentation-side collaborators.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use catalog_fetcher::app::{
//!     CatalogClient, CatalogCoordinator, CoordinatorConfig, LoggingObserver,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(CatalogClient::new()?);
//! let coordinator = CatalogCoordinator::new(
//!     CoordinatorConfig::default(),
//!     client,
//!     Arc::new(LoggingObserver),
//! );
//!
//! let result = coordinator.run().await?;
//! for (category, products) in result.catalog.iter() {
//!     println!("{}: {} products", category, products.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod coordinator;
pub mod images;
pub mod presentation;

// Re-export main public API
pub use catalog::{
    Catalog, CatalogEntry, CatalogSummary, Product, ProductKey, ProductSummary, build_catalog,
    decode_catalog, parse_price,
};
pub use client::{CatalogClient, ClientConfig, ResourceFetcher};
pub use coordinator::{
    CatalogCoordinator, CompletionTracker, CoordinatorConfig, PipelineStats, ReadyEvent,
    ReadySignalPolicy, SessionResult,
};
pub use images::{FetchMessage, ImageFetcher, ImageHandle, ImageJob};
pub use presentation::{
    CatalogObserver, LoggingObserver, ModelLoader, ProductActions, ProductInfoHandler,
};
