//! Catalog decoding, normalization and storage
//!
//! # Module Organization
//!
//! - [`types`] - Raw entries, normalized products and their serializable summaries
//! - [`decoder`] - JSON document decoding
//! - [`builder`] - Entry normalization, bucketing and tracker registration
//! - [`store`] - The category-partitioned [`Catalog`]
//!
//! # Examples
//!
//! ```rust
//! use catalog_fetcher::app::catalog::decode_catalog;
//!
//! let entries = decode_catalog(r#"[{"category": "Chair", "name": "Stool"}]"#).unwrap();
//! assert_eq!(entries[0].category, "Chair");
//! ```

pub mod builder;
pub mod decoder;
pub mod store;
pub mod types;

pub use builder::{build_catalog, parse_price};
pub use decoder::decode_catalog;
pub use store::{normalize_category, Catalog, CatalogSummary, CategorySummary};
pub use types::{CatalogEntry, ImageSummary, Product, ProductKey, ProductSummary};
