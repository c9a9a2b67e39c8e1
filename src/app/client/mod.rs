//! HTTP client for the product catalog and its image assets
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: core HTTP operations with rate limiting
//!
//! The pipeline talks to the network through the [`ResourceFetcher`] trait
//! so that the coordinator can be driven by any transport, including the
//! in-memory fetchers used in tests.

use async_trait::async_trait;

use crate::errors::FetchResult;

pub mod config;
pub mod http;

pub use config::ClientConfig;

use http::HttpHandler;

/// Source of remote resources used by the pipeline
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch a text document (the catalog)
    async fn fetch_text(&self, url: &str) -> FetchResult<String>;

    /// Fetch a binary payload (an image)
    async fn fetch_bytes(&self, url: &str) -> FetchResult<Vec<u8>>;
}

/// HTTP client for the catalog host and image hosts
///
/// A single instance is shared by every image task; the rate limiter inside
/// applies across all of them.
#[derive(Debug)]
pub struct CatalogClient {
    http_handler: HttpHandler,
}

impl CatalogClient {
    /// Creates a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if HTTP client creation fails
    pub fn new() -> FetchResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if HTTP client creation fails or the rate limit is zero
    pub fn with_config(config: ClientConfig) -> FetchResult<Self> {
        let client = config.build_http_client()?;
        let http_handler = HttpHandler::new(client, config.rate_limit_rps)?;

        tracing::debug!(
            "Created catalog client (rate limit {} rps, timeout {:?})",
            config.rate_limit_rps,
            config.request_timeout
        );

        Ok(Self { http_handler })
    }
}

#[async_trait]
impl ResourceFetcher for CatalogClient {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let url = HttpHandler::parse_url(url)?;
        self.http_handler.get_text(&url).await
    }

    async fn fetch_bytes(&self, url: &str) -> FetchResult<Vec<u8>> {
        let url = HttpHandler::parse_url(url)?;
        self.http_handler.get_bytes(&url).await
    }
}
