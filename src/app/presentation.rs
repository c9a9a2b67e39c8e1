//! Collaborators on the presentation side of the pipeline
//!
//! The coordinator reports readiness through a [`CatalogObserver`]; product
//! actions are routed to a [`ProductInfoHandler`] and a [`ModelLoader`]
//! bundled in [`ProductActions`]. All of them are injected at construction.

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::catalog::Product;
use crate::errors::AppError;

/// Receives pipeline readiness events
///
/// Callbacks run on the coordinator task and should return quickly.
pub trait CatalogObserver: Send + Sync {
    /// Every product in `category` has resolved its primary image
    fn on_category_ready(&self, category: &str, products: &[Product]);

    /// Every known category is ready
    fn on_catalog_ready(&self);

    /// The catalog could not be fetched or decoded; no ready events follow
    fn on_load_failed(&self, error: &AppError) {
        let _ = error;
    }
}

/// Observer that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl CatalogObserver for LoggingObserver {
    fn on_category_ready(&self, category: &str, products: &[Product]) {
        info!("Category {} ready with {} products", category, products.len());
    }

    fn on_catalog_ready(&self) {
        info!("Catalog ready");
    }

    fn on_load_failed(&self, error: &AppError) {
        warn!("Catalog failed to load: {}", error);
    }
}

/// Shows the details of a product
pub trait ProductInfoHandler: Send + Sync {
    fn show_product_info(&self, product: &Product);
}

/// Loads a product's 3D model for viewing
pub trait ModelLoader: Send + Sync {
    fn load_model(&self, model_url: &str, product: &Product);
}

/// The "view details" and "view in AR" actions of a product
#[derive(Clone)]
pub struct ProductActions {
    info: Arc<dyn ProductInfoHandler>,
    models: Arc<dyn ModelLoader>,
}

impl ProductActions {
    pub fn new(info: Arc<dyn ProductInfoHandler>, models: Arc<dyn ModelLoader>) -> Self {
        Self { info, models }
    }

    /// Hand the product to the info handler
    pub fn view_details(&self, product: &Product) {
        self.info.show_product_info(product);
    }

    /// Hand the product's model URL to the model loader
    ///
    /// Returns `false` without calling the loader when the product has no
    /// model URL.
    pub fn view_in_ar(&self, product: &Product) -> bool {
        if product.model_url.trim().is_empty() {
            warn!("Product {:?} has no model URL", product.name);
            return false;
        }
        self.models.load_model(&product.model_url, product);
        true
    }
}
