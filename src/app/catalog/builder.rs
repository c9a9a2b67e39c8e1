//! Catalog building from decoded entries
//!
//! The builder runs once per session, before any image is requested. Every
//! product is registered with the completion tracker during this pass, so
//! category totals are final by the time the first image task reports back.

use tracing::debug;

use super::store::{normalize_category, Catalog};
use super::types::{CatalogEntry, Product};
use crate::app::coordinator::completion::CompletionTracker;
use crate::app::images::ImageJob;
use crate::constants::catalog::FALLBACK_PRICE;
use crate::errors::ParseWarning;

/// Parses the catalog's price text
///
/// Surrounding whitespace and `,` digit grouping are accepted. Non-finite
/// values are rejected.
pub fn parse_price(text: &str) -> Result<f64, ParseWarning> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(ParseWarning {
            text: text.to_string(),
        }),
    }
}

/// Populates the catalog and tracker from decoded entries
///
/// Every bucket already in the catalog is registered with the tracker
/// first, so empty categories count towards catalog completion. Returns one
/// image job per product, in catalog order. Price parse failures fall back
/// to zero and are only logged at debug level.
pub fn build_catalog(
    entries: Vec<CatalogEntry>,
    catalog: &mut Catalog,
    tracker: &mut CompletionTracker,
) -> Vec<ImageJob> {
    for category in catalog.categories() {
        tracker.register(category);
    }

    let mut jobs = Vec::with_capacity(entries.len());

    for entry in entries {
        let category = normalize_category(&entry.category);
        if catalog.ensure_bucket(&category) {
            debug!("New category discovered: {}", category);
        }
        tracker.register(&category);

        let price = parse_price(&entry.price_text).unwrap_or_else(|warning| {
            debug!("{} for product {:?}", warning, entry.name);
            FALLBACK_PRICE
        });

        let product = Product::from_entry(&entry, category.clone(), price);
        let key = catalog.push(product);
        tracker.add_product(&category);

        jobs.push(ImageJob {
            key,
            product_name: entry.name,
            urls: entry.images,
        });
    }

    jobs
}
