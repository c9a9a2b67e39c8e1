//! Configuration management for Catalog Fetcher
//!
//! This module provides file-based configuration with zero-config defaults.
//! Every section is optional in the file; missing values keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ClientConfig, CoordinatorConfig};
use crate::constants::{config as paths, logging};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog source and completion settings
    pub catalog: CoordinatorConfig,
    /// HTTP client settings
    pub client: ClientConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, or the first one found)
    ///
    /// CLI arguments are applied on top by the caller.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Self::load_from_file(&path).await?
            }
            None => match Self::find_config_file() {
                Some(path) => Self::load_from_file(&path).await?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Find a configuration file in the standard locations
    pub fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(paths::LOCAL_CONFIG_FILE)];
        if let Ok(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Default config file path for the current user
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir
            .join(paths::CONFIG_DIR_NAME)
            .join(paths::CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Split into the runtime configurations
    pub fn to_runtime_config(&self) -> (CoordinatorConfig, ClientConfig) {
        (self.catalog.clone(), self.client.clone())
    }

    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.catalog
            .validate()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "catalog".to_string(),
                value: self.catalog.catalog_url.clone(),
                reason,
            })?;

        self.client
            .validate()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "client".to_string(),
                value: format!("{} rps", self.client.rate_limit_rps),
                reason,
            })?;

        self.logging
            .level
            .parse::<tracing::Level>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: "Expected one of error, warn, info, debug, trace".to_string(),
            })?;

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
