//! Per-category completion tracking
//!
//! This module holds the counters that decide when a category, and then the
//! whole catalog, is ready for presentation. A product counts as resolved
//! once its primary image attempt has concluded, whether it succeeded or
//! not, so failures never hold a category back.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How ready events behave once their condition already holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadySignalPolicy {
    /// Re-evaluate and re-emit on every completion check that finds the
    /// condition satisfied
    #[default]
    EveryCheck,
    /// Emit each category's event, and the catalog event, at most once
    Once,
}

/// Counters for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounters {
    /// Products assigned to the category
    pub total: usize,
    /// Products whose primary image attempt has concluded
    pub resolved: usize,
}

impl CategoryCounters {
    pub fn is_complete(&self) -> bool {
        self.resolved >= self.total
    }
}

/// Transition emitted by the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyEvent {
    /// Every product of the category has resolved
    CategoryReady(String),
    /// Every known category is complete
    CatalogReady,
}

/// Completion tracker for the catalog's categories
#[derive(Debug, Clone)]
pub struct CompletionTracker {
    counters: IndexMap<String, CategoryCounters>,
    policy: ReadySignalPolicy,
    announced: HashSet<String>,
    catalog_announced: bool,
}

impl CompletionTracker {
    /// Create an empty tracker
    pub fn new(policy: ReadySignalPolicy) -> Self {
        Self {
            counters: IndexMap::new(),
            policy,
            announced: HashSet::new(),
            catalog_announced: false,
        }
    }

    /// Start tracking a category with both counters at zero
    ///
    /// Returns `true` if the category was not known before.
    pub fn register(&mut self, category: &str) -> bool {
        if self.counters.contains_key(category) {
            return false;
        }
        self.counters
            .insert(category.to_string(), CategoryCounters::default());
        true
    }

    /// Count one more product in the category
    pub fn add_product(&mut self, category: &str) {
        self.counters.entry(category.to_string()).or_default().total += 1;
    }

    /// Record the conclusion of one product's primary image attempt
    ///
    /// Resolutions beyond the category's total, or for an unknown category,
    /// are logged and ignored.
    pub fn record_resolution(&mut self, category: &str) -> Vec<ReadyEvent> {
        let Some(counters) = self.counters.get_mut(category) else {
            warn!("Resolution recorded for unknown category {:?}", category);
            return Vec::new();
        };

        if counters.resolved >= counters.total {
            warn!(
                "Ignoring surplus resolution for {:?} ({}/{})",
                category, counters.resolved, counters.total
            );
            return Vec::new();
        }

        counters.resolved += 1;
        debug!(
            "Category {:?}: {}/{} resolved",
            category, counters.resolved, counters.total
        );

        self.check_category_completion(category)
    }

    /// Evaluate the ready conditions for a category
    ///
    /// Emits `CategoryReady` when the category is complete, followed by
    /// `CatalogReady` when every known category is complete as well.
    pub fn check_category_completion(&mut self, category: &str) -> Vec<ReadyEvent> {
        let mut events = Vec::new();

        match self.counters.get(category) {
            Some(counters) if counters.is_complete() => {}
            _ => return events,
        }

        let first_time = self.announced.insert(category.to_string());
        if first_time || self.policy == ReadySignalPolicy::EveryCheck {
            events.push(ReadyEvent::CategoryReady(category.to_string()));
        }

        if self.is_catalog_complete() {
            let first_time = !self.catalog_announced;
            self.catalog_announced = true;
            if first_time || self.policy == ReadySignalPolicy::EveryCheck {
                events.push(ReadyEvent::CatalogReady);
            }
        }

        events
    }

    pub fn counters(&self, category: &str) -> Option<CategoryCounters> {
        self.counters.get(category).copied()
    }

    pub fn is_category_complete(&self, category: &str) -> bool {
        self.counters
            .get(category)
            .map_or(false, CategoryCounters::is_complete)
    }

    /// Whether every known category is complete
    pub fn is_catalog_complete(&self) -> bool {
        self.counters.values().all(CategoryCounters::is_complete)
    }

    /// Iterate over `(category, counters)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, CategoryCounters)> {
        self.counters
            .iter()
            .map(|(category, counters)| (category.as_str(), *counters))
    }

    pub fn total_products(&self) -> usize {
        self.counters.values().map(|c| c.total).sum()
    }

    pub fn resolved_products(&self) -> usize {
        self.counters.values().map(|c| c.resolved).sum()
    }

    pub fn policy(&self) -> ReadySignalPolicy {
        self.policy
    }
}
