//! Category-partitioned product storage

use indexmap::IndexMap;
use serde::Serialize;

use super::types::{Product, ProductKey, ProductSummary};

/// In-memory catalog: lowercase category key → ordered products
///
/// Buckets keep the order in which categories were first seen, starting
/// with the initial categories passed at construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    buckets: IndexMap<String, Vec<Product>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with empty buckets for the given categories
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::new();
        for category in categories {
            catalog.ensure_bucket(&normalize_category(category.as_ref()));
        }
        catalog
    }

    /// Create the bucket if it does not exist yet
    ///
    /// Returns `true` when a new bucket was created.
    pub fn ensure_bucket(&mut self, category: &str) -> bool {
        if self.buckets.contains_key(category) {
            return false;
        }
        self.buckets.insert(category.to_string(), Vec::new());
        true
    }

    /// Append a product to its category bucket
    pub fn push(&mut self, product: Product) -> ProductKey {
        let category = product.category.clone();
        let bucket = self.buckets.entry(category.clone()).or_default();
        bucket.push(product);
        ProductKey::new(category, bucket.len() - 1)
    }

    /// Products of a category, in catalog order
    pub fn bucket(&self, category: &str) -> Option<&[Product]> {
        self.buckets.get(category).map(Vec::as_slice)
    }

    pub fn product(&self, key: &ProductKey) -> Option<&Product> {
        self.buckets.get(&key.category)?.get(key.index)
    }

    pub fn product_mut(&mut self, key: &ProductKey) -> Option<&mut Product> {
        self.buckets.get_mut(&key.category)?.get_mut(key.index)
    }

    /// Category keys in bucket order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Iterate over `(category, products)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Product])> {
        self.buckets
            .iter()
            .map(|(category, products)| (category.as_str(), products.as_slice()))
    }

    /// Total number of products across all buckets
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the first product whose name matches, ignoring case
    pub fn find_product(&self, name: &str) -> Option<&Product> {
        let wanted = name.trim().to_lowercase();
        self.buckets
            .values()
            .flatten()
            .find(|product| product.name.to_lowercase() == wanted)
    }

    /// Serializable view of the whole catalog
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            categories: self
                .iter()
                .map(|(category, products)| CategorySummary {
                    category: category.to_string(),
                    products: products.iter().map(Product::summary).collect(),
                })
                .collect(),
        }
    }
}

/// Lowercase form used as the bucket key
pub fn normalize_category(category: &str) -> String {
    category.to_lowercase()
}

/// Serializable catalog overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub categories: Vec<CategorySummary>,
}

/// Serializable category overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub products: Vec<ProductSummary>,
}
