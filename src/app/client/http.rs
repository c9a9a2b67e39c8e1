//! Core HTTP operations with rate limiting
//!
//! Every request passes through a shared rate limiter. Requests are made
//! exactly once: a failure is reported to the caller, which decides whether
//! to fall back to another URL or to skip the resource.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use reqwest::Client;
use url::Url;

use crate::errors::{FetchError, FetchResult};

type DirectRateLimiter = RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>;

/// HTTP operations handler
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: DirectRateLimiter,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client and rate limiting
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the rate limit is zero
    pub fn new(client: Client, rate_limit_rps: u32) -> FetchResult<Self> {
        let rate_limiter = Self::build_rate_limiter(rate_limit_rps)?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    fn build_rate_limiter(rate_limit_rps: u32) -> FetchResult<DirectRateLimiter> {
        let quota = Quota::per_second(
            NonZeroU32::new(rate_limit_rps)
                .ok_or_else(|| FetchError::Other("Rate limit must be non-zero".to_string()))?,
        );
        Ok(RateLimiter::direct(quota))
    }

    /// Parses a URL string taken from the catalog
    pub fn parse_url(url: &str) -> FetchResult<Url> {
        Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            error: e.to_string(),
        })
    }

    /// Fetches the HTTP response with rate limiting
    ///
    /// Non-success statuses are turned into `FetchError::Status`.
    pub async fn get_response(&self, url: &Url) -> FetchResult<reqwest::Response> {
        // Jitter keeps a burst of image requests from hitting the host in lockstep
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(50)))
            .await;

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Request to {} returned {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::debug!("Successfully fetched response: {}", url);
        Ok(response)
    }

    /// Fetches a response body as text
    pub async fn get_text(&self, url: &Url) -> FetchResult<String> {
        let response = self.get_response(url).await?;
        Ok(response.text().await?)
    }

    /// Fetches a response body as raw bytes
    pub async fn get_bytes(&self, url: &Url) -> FetchResult<Vec<u8>> {
        let response = self.get_response(url).await?;
        let bytes = response.bytes().await?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
