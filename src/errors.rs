//! Error types for Catalog Fetcher
//!
//! This module defines the error taxonomy of the fetch-and-hydrate pipeline.
//! Only a catalog that cannot be obtained or decoded stops the pipeline;
//! image fetch failures are logged and absorbed, and unparseable prices are
//! defaulted without being surfaced.

use std::path::PathBuf;
use thiserror::Error;

/// Catalog document decoding errors
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The document is not a well-formed JSON array
    #[error("Catalog document is not a valid JSON array: {0}")]
    Malformed(#[source] serde_json::Error),

    /// An element of the array does not have the expected shape
    #[error("Invalid catalog entry at index {index}: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Network and image retrieval errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL provided
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Server returned a non-success status
    #[error("Server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Payload could not be decoded into a bitmap
    #[error("Could not decode image from {url}: {reason}")]
    ImageDecode { url: String, reason: String },

    /// I/O error while reading a local catalog document
    #[error("Failed to read catalog document: {path}")]
    LocalDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic error for other issues
    #[error("{0}")]
    Other(String),
}

/// A price text that could not be parsed; the price falls back to zero
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unparseable price text: {text:?}")]
pub struct ParseWarning {
    pub text: String,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file: {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration could not be rendered
    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// User config directory could not be determined
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Catalog decoding error
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Whether the error aborts the whole pipeline
    ///
    /// When an `AppError` reaches the pipeline boundary it is always fatal
    /// except for image-level fetch failures, which are absorbed earlier and
    /// only show up here when callers wrap them explicitly.
    pub fn is_fatal(&self) -> bool {
        match self {
            AppError::Decode(_) | AppError::Config(_) => true,
            AppError::Fetch(FetchError::ImageDecode { .. }) => false,
            AppError::Fetch(_) => true,
            AppError::Io(_) | AppError::Generic { .. } => true,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Decode(_) => "decode",
            AppError::Fetch(_) => "fetch",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Decode result type alias
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
