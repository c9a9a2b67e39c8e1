//! Catalog fetch orchestration
//!
//! This module provides the coordination layer that turns a catalog URL into
//! a hydrated, category-partitioned catalog. The coordinator is the single
//! owner of the catalog and the completion counters: image tasks run
//! concurrently in a task group and report back over a channel, and only
//! the coordinator applies their results.
//!
//! # Architecture
//!
//! - [`config`] - Configuration structures and validation
//! - [`completion`] - Per-category completion tracking and ready events
//! - [`stats`] - Pipeline statistics and the session result
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
//! println!("{}", result.stats.summary());
//! # Ok(())
//! # }
//! ```

pub mod completion;
pub mod config;
pub mod stats;

#[cfg(test)]
pub mod tests;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::app::catalog::{build_catalog, decode_catalog, Catalog};
use crate::app::client::ResourceFetcher;
use crate::app::images::{FetchMessage, ImageFetcher};
use crate::app::presentation::CatalogObserver;
use crate::errors::{AppError, ConfigError, Result};

pub use completion::{CategoryCounters, CompletionTracker, ReadyEvent, ReadySignalPolicy};
pub use config::CoordinatorConfig;
pub use stats::{PipelineStats, SessionResult};

/// Coordinator for one catalog fetch-and-hydrate session
pub struct CatalogCoordinator {
    config: CoordinatorConfig,
    fetcher: Arc<dyn ResourceFetcher>,
    observer: Arc<dyn CatalogObserver>,
}

impl CatalogCoordinator {
    /// Create a coordinator with its transport and presentation collaborator
    pub fn new(
        config: CoordinatorConfig,
        fetcher: Arc<dyn ResourceFetcher>,
        observer: Arc<dyn CatalogObserver>,
    ) -> Self {
        Self {
            config,
            fetcher,
            observer,
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Fetch the catalog document and hydrate it
    ///
    /// # Errors
    ///
    /// Returns an error, after notifying the observer, if the configuration
    /// is invalid or the catalog document cannot be fetched or decoded.
    /// Image failures never surface here.
    pub async fn run(&self) -> Result<SessionResult> {
        self.validate()?;

        info!("Fetching catalog from {}", self.config.catalog_url);
        let document = match self.fetcher.fetch_text(&self.config.catalog_url).await {
            Ok(document) => document,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.run_with_document(&document).await
    }

    /// Hydrate an already retrieved catalog document
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run), minus the document fetch.
    pub async fn run_with_document(&self, document: &str) -> Result<SessionResult> {
        self.validate()?;

        let session_start = Instant::now();
        let entries = match decode_catalog(document) {
            Ok(entries) => entries,
            Err(e) => return Err(self.fail(e.into())),
        };

        let mut session = Session::new(&self.config);
        let jobs = build_catalog(entries, &mut session.catalog, &mut session.tracker);
        session.stats.total_products = jobs.len();
        session.stats.categories = session.tracker.iter().count();
        info!(
            "Catalog decoded: {} products in {} categories",
            session.stats.total_products, session.stats.categories
        );

        if jobs.is_empty() {
            info!("Catalog is empty");
            session.announce_catalog(self.observer.as_ref());
        }

        let (tx, mut rx) = mpsc::channel(self.config.message_buffer_size);
        let image_fetcher = Arc::new(ImageFetcher::new(self.fetcher.clone()));
        let mut tasks = JoinSet::new();
        for job in jobs {
            let image_fetcher = image_fetcher.clone();
            let tx = tx.clone();
            tasks.spawn(async move { image_fetcher.hydrate(job, tx).await });
        }
        // The loop below ends once every task has dropped its sender
        drop(tx);

        while let Some(message) = rx.recv().await {
            session.apply(message, self.observer.as_ref());
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!("Image task failed: {}", e);
                session.stats.failed_tasks += 1;
            }
        }

        session.stats.session_duration = session_start.elapsed();
        info!("Catalog hydrated: {}", session.stats.summary());

        Ok(session.finish())
    }

    fn validate(&self) -> Result<()> {
        self.config.validate().map_err(|reason| {
            let error = AppError::from(ConfigError::InvalidValue {
                field: "coordinator".to_string(),
                value: self.config.catalog_url.clone(),
                reason,
            });
            self.fail(error)
        })
    }

    fn fail(&self, error: AppError) -> AppError {
        error!("Catalog load failed ({}): {}", error.category(), error);
        self.observer.on_load_failed(&error);
        error
    }
}

/// State owned by the coordinator for one run
struct Session {
    catalog: Catalog,
    tracker: CompletionTracker,
    stats: PipelineStats,
    ready_categories: Vec<String>,
    catalog_ready: bool,
}

impl Session {
    fn new(config: &CoordinatorConfig) -> Self {
        Self {
            catalog: Catalog::with_categories(&config.initial_categories),
            tracker: CompletionTracker::new(config.ready_policy),
            stats: PipelineStats {
                session_start: Utc::now(),
                ..Default::default()
            },
            ready_categories: Vec::new(),
            catalog_ready: false,
        }
    }

    fn apply(&mut self, message: FetchMessage, observer: &dyn CatalogObserver) {
        match message {
            FetchMessage::PrimaryResolved { key, image } => {
                if let Some(product) = self.catalog.product_mut(&key) {
                    match image {
                        Some(image) => {
                            product.set_primary_image(image);
                            self.stats.primary_images += 1;
                        }
                        None => self.stats.missing_primary_images += 1,
                    }
                }

                for event in self.tracker.record_resolution(&key.category) {
                    match event {
                        ReadyEvent::CategoryReady(category) => {
                            self.announce_category(&category, observer)
                        }
                        ReadyEvent::CatalogReady => self.announce_catalog(observer),
                    }
                }
            }
            FetchMessage::ImageAppended { key, image } => {
                if let Some(product) = self.catalog.product_mut(&key) {
                    product.append_image(image);
                    self.stats.extra_images += 1;
                }
            }
            FetchMessage::ImageFailed { key, url, error } => {
                debug!("Image request for {:?} failed: {} ({})", key, url, error);
                self.stats.failed_image_fetches += 1;
            }
        }
    }

    fn announce_category(&mut self, category: &str, observer: &dyn CatalogObserver) {
        let products = self.catalog.bucket(category).unwrap_or(&[]);
        info!("Category {} ready ({} products)", category, products.len());
        observer.on_category_ready(category, products);

        self.stats.category_ready_events += 1;
        if !self.ready_categories.iter().any(|c| c == category) {
            self.ready_categories.push(category.to_string());
        }
    }

    fn announce_catalog(&mut self, observer: &dyn CatalogObserver) {
        info!("All categories ready");
        observer.on_catalog_ready();
        self.stats.catalog_ready_events += 1;
        self.catalog_ready = true;
    }

    fn finish(self) -> SessionResult {
        SessionResult {
            catalog: self.catalog,
            stats: self.stats,
            ready_categories: self.ready_categories,
            catalog_ready: self.catalog_ready,
        }
    }
}
