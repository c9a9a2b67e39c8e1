//! Loading indicator for the fetch command
//!
//! The indicator is an indicatif spinner that runs while the catalog loads.
//! It implements [`CatalogObserver`], printing each category as it becomes
//! ready and finishing when the whole catalog is ready or the load fails.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use catalog_fetcher::app::{CatalogClient, CatalogCoordinator, CoordinatorConfig};
//! use catalog_fetcher::cli::{LoadingIndicator, ProgressConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let indicator = Arc::new(LoadingIndicator::new(ProgressConfig::default())?);
//! let coordinator = CatalogCoordinator::new(
//!     CoordinatorConfig::default(),
//!     Arc::new(CatalogClient::new()?),
//!     indicator.clone(),
//! );
//!
//! indicator.start("Loading catalog");
//! coordinator.run().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::app::{CatalogObserver, Product};
use crate::errors::{AppError, Result};

/// Configuration for the loading indicator
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Draw the spinner; when disabled only the printed lines remain
    pub enable_spinner: bool,
    /// Spinner tick interval
    pub tick_interval: Duration,
    /// Print a line per ready category
    pub show_categories: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enable_spinner: true,
            tick_interval: Duration::from_millis(100),
            show_categories: true,
        }
    }
}

/// State of the indicator as seen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Spinner shown while the catalog loads
pub struct LoadingIndicator {
    config: ProgressConfig,
    bar: ProgressBar,
    state: Mutex<IndicatorState>,
    lines: Mutex<Vec<String>>,
}

impl LoadingIndicator {
    /// Create the indicator
    ///
    /// # Errors
    ///
    /// Returns an error if the spinner template is invalid
    pub fn new(config: ProgressConfig) -> Result<Self> {
        let bar = if config.enable_spinner {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.blue} {msg} [{elapsed}]")
                    .map_err(|e| AppError::generic(format!("Spinner template error: {}", e)))?,
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        Ok(Self {
            config,
            bar,
            state: Mutex::new(IndicatorState::Idle),
            lines: Mutex::new(Vec::new()),
        })
    }

    /// Show the spinner with a message
    pub fn start(&self, message: &str) {
        self.bar.set_message(message.to_string());
        if self.config.enable_spinner {
            self.bar.enable_steady_tick(self.config.tick_interval);
        }
        self.set_state(IndicatorState::Loading);
    }

    pub fn state(&self) -> IndicatorState {
        self.state
            .lock()
            .map(|state| *state)
            .unwrap_or(IndicatorState::Failed)
    }

    /// Lines printed above the spinner so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    fn set_state(&self, state: IndicatorState) {
        if let Ok(mut current) = self.state.lock() {
            *current = state;
        }
    }

    fn print(&self, line: String) {
        if self.config.enable_spinner {
            self.bar.println(&line);
        } else {
            println!("{}", line);
        }
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl CatalogObserver for LoadingIndicator {
    fn on_category_ready(&self, category: &str, products: &[Product]) {
        debug!("Indicator: category {} ready", category);
        if !self.config.show_categories {
            return;
        }

        let with_images = products.iter().filter(|p| p.has_primary_image()).count();
        self.print(format!(
            "✅ {}: {} products ({} with thumbnails)",
            category,
            products.len(),
            with_images
        ));
    }

    fn on_catalog_ready(&self) {
        self.set_state(IndicatorState::Ready);
        self.bar.finish_with_message("Catalog ready");
    }

    fn on_load_failed(&self, error: &AppError) {
        self.set_state(IndicatorState::Failed);
        self.bar
            .abandon_with_message(format!("Catalog failed to load: {}", error));
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
