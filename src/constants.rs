//! Application constants for Catalog Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Catalog source and category constants
pub mod catalog {
    /// Default location of the product catalog document
    pub const DEFAULT_CATALOG_URL: &str =
        "https://raw.githubusercontent.com/TWAnnoyingKid/AR_Furniture_App/main/product.json";

    /// Categories whose buckets exist before the catalog is decoded
    pub const INITIAL_CATEGORIES: [&str; 4] = ["chair", "desk", "drawer", "sofa"];

    /// Price used when the catalog's price text cannot be parsed
    pub const FALLBACK_PRICE: f64 = 0.0;
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "Catalog-Fetcher/0.1.0";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 16;
}

/// Rate limiting configuration
pub mod limits {
    /// Default rate limit for outbound requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 25;
}

/// Coordinator and orchestration constants
pub mod coordinator {
    /// Capacity of the channel carrying fetch results to the coordinator
    pub const MESSAGE_BUFFER_SIZE: usize = 256;
}

/// Configuration file locations
pub mod config {
    /// Directory name under the user's config directory
    pub const CONFIG_DIR_NAME: &str = "catalog-fetcher";

    /// File name of the user configuration
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Project-local configuration file
    pub const LOCAL_CONFIG_FILE: &str = "./catalog-fetcher.toml";
}

/// Logging and debugging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use catalog::{DEFAULT_CATALOG_URL, INITIAL_CATEGORIES};
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use limits::DEFAULT_RATE_LIMIT_RPS;
