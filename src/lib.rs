//! Catalog Fetcher Library
//!
//! A Rust library for loading a remote product catalog: it fetches a JSON
//! document, buckets products by category, retrieves their images with
//! fallback, and reports when each category and the whole catalog are ready.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
