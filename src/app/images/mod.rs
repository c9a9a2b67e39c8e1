//! Product image retrieval and decoding
//!
//! - [`handle`] - [`ImageHandle`], a decoded bitmap with its source URL
//! - [`fetcher`] - [`ImageFetcher`], the per-product primary/fallback/background logic

pub mod fetcher;
pub mod handle;

pub use fetcher::{FetchMessage, ImageFetcher, ImageJob};
pub use handle::ImageHandle;
