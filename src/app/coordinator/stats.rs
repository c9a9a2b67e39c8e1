//! Pipeline statistics and session results

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::catalog::Catalog;

/// Counters collected while a catalog is hydrated
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Products built from the catalog document
    pub total_products: usize,
    /// Categories known to the tracker, including empty ones
    pub categories: usize,
    /// Products that ended with a primary image
    pub primary_images: usize,
    /// Products whose every image URL failed, or that had none
    pub missing_primary_images: usize,
    /// Images appended by background retrieval
    pub extra_images: usize,
    /// Individual image requests that failed
    pub failed_image_fetches: usize,
    /// Category ready events delivered to the observer
    pub category_ready_events: usize,
    /// Catalog ready events delivered to the observer
    pub catalog_ready_events: usize,
    /// Image tasks that panicked or were cancelled
    pub failed_tasks: usize,
    /// Start time of the session
    pub session_start: DateTime<Utc>,
    /// Time from decode to the last image task finishing
    pub session_duration: Duration,
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self {
            total_products: 0,
            categories: 0,
            primary_images: 0,
            missing_primary_images: 0,
            extra_images: 0,
            failed_image_fetches: 0,
            category_ready_events: 0,
            catalog_ready_events: 0,
            failed_tasks: 0,
            session_start: Utc::now(),
            session_duration: Duration::ZERO,
        }
    }
}

impl PipelineStats {
    /// Products whose primary attempt has concluded
    pub fn resolved_products(&self) -> usize {
        self.primary_images + self.missing_primary_images
    }

    /// Share of products with a primary image, as a percentage
    pub fn primary_success_rate(&self) -> f64 {
        if self.total_products == 0 {
            return 0.0;
        }
        (self.primary_images as f64 / self.total_products as f64) * 100.0
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} products in {} categories: {} with images ({:.1}%), {} without, {} extra images, {} failed requests in {:.2?}",
            self.total_products,
            self.categories,
            self.primary_images,
            self.primary_success_rate(),
            self.missing_primary_images,
            self.extra_images,
            self.failed_image_fetches,
            self.session_duration
        )
    }
}

/// Final result of a pipeline run
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// The hydrated catalog
    pub catalog: Catalog,
    /// Final statistics
    pub stats: PipelineStats,
    /// Categories in the order their first ready event fired
    pub ready_categories: Vec<String>,
    /// Whether the catalog ready event fired
    pub catalog_ready: bool,
}
