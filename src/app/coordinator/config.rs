//! Configuration structures for the catalog coordinator

use serde::{Deserialize, Serialize};

use super::completion::ReadySignalPolicy;
use crate::constants::{catalog, coordinator};

/// Configuration for the catalog coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Location of the catalog document
    pub catalog_url: String,
    /// Categories whose buckets exist before decoding
    pub initial_categories: Vec<String>,
    /// Whether ready events may repeat
    pub ready_policy: ReadySignalPolicy,
    /// Capacity of the channel between image tasks and the coordinator
    pub message_buffer_size: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            catalog_url: catalog::DEFAULT_CATALOG_URL.to_string(),
            initial_categories: catalog::INITIAL_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            ready_policy: ReadySignalPolicy::default(),
            message_buffer_size: coordinator::MESSAGE_BUFFER_SIZE,
        }
    }
}

impl CoordinatorConfig {
    /// Set the catalog document location
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    /// Replace the initial category set
    pub fn with_initial_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initial_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ready event policy
    pub fn with_ready_policy(mut self, policy: ReadySignalPolicy) -> Self {
        self.ready_policy = policy;
        self
    }

    /// Set the message channel capacity
    pub fn with_message_buffer_size(mut self, size: usize) -> Self {
        self.message_buffer_size = size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.catalog_url.trim().is_empty() {
            return Err("Catalog URL cannot be empty".to_string());
        }

        if self.message_buffer_size == 0 {
            return Err("Message buffer size cannot be zero".to_string());
        }

        if let Some(blank) = self.initial_categories.iter().find(|c| c.trim().is_empty()) {
            return Err(format!("Initial category {:?} is blank", blank));
        }

        Ok(())
    }
}
