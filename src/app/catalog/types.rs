//! Core catalog data structures
//!
//! [`CatalogEntry`] mirrors one object of the remote JSON document;
//! [`Product`] is the normalized value the rest of the pipeline works with.

use serde::{Deserialize, Deserializer, Serialize};

use crate::app::images::ImageHandle;

/// One raw record of the catalog document
///
/// Only `category` is required. Every other field falls back to an empty
/// value when it is missing or `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    /// Category name as written in the document (any case)
    pub category: String,
    /// Product name
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Price as text, parsed later with a silent fallback
    #[serde(default, rename = "price_string", deserialize_with = "price_text")]
    pub price_text: String,
    /// Product page link
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    /// Free-form description
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    /// Location of the 3D model
    #[serde(default, deserialize_with = "nullable")]
    pub model_url: String,
    /// Available sizes; only the first one is used
    #[serde(default, deserialize_with = "nullable")]
    pub size_options: Vec<String>,
    /// Image URLs in display order; `null` items are dropped
    #[serde(default, deserialize_with = "url_list")]
    pub images: Vec<String>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn url_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let urls = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(urls.unwrap_or_default().into_iter().flatten().collect())
}

/// Accepts the price as a string or a bare JSON number
fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

/// Position of a product inside the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductKey {
    /// Normalized (lowercase) category
    pub category: String,
    /// Index within the category bucket
    pub index: usize,
}

impl ProductKey {
    pub fn new(category: impl Into<String>, index: usize) -> Self {
        Self {
            category: category.into(),
            index,
        }
    }
}

/// A normalized catalog product
#[derive(Debug, Clone)]
pub struct Product {
    /// Bucket the product belongs to
    pub category: String,
    pub name: String,
    pub price: f64,
    pub url: String,
    pub description: String,
    pub model_url: String,
    /// First size option, or empty when the entry listed none
    pub primary_size_option: String,
    /// Thumbnail; absent until the primary fetch succeeds
    pub primary_image: Option<ImageHandle>,
    /// Every retrieved image, primary first
    pub all_images: Vec<ImageHandle>,
    /// Provenance marker; always `false` for products from the remote catalog
    pub origin_flag: bool,
}

impl Product {
    /// Builds a product without images from a decoded entry
    pub fn from_entry(entry: &CatalogEntry, category: impl Into<String>, price: f64) -> Self {
        Self {
            category: category.into(),
            name: entry.name.clone(),
            price,
            url: entry.url.clone(),
            description: entry.description.clone(),
            model_url: entry.model_url.clone(),
            primary_size_option: entry.size_options.first().cloned().unwrap_or_default(),
            primary_image: None,
            all_images: Vec::new(),
            origin_flag: false,
        }
    }

    /// Installs the primary image at the head of `all_images`
    pub fn set_primary_image(&mut self, image: ImageHandle) {
        self.all_images.insert(0, image.clone());
        self.primary_image = Some(image);
    }

    /// Appends an image retrieved in the background
    pub fn append_image(&mut self, image: ImageHandle) {
        self.all_images.push(image);
    }

    pub fn has_primary_image(&self) -> bool {
        self.primary_image.is_some()
    }

    /// Serializable view without bitmap data
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            name: self.name.clone(),
            price: self.price,
            url: self.url.clone(),
            description: self.description.clone(),
            model_url: self.model_url.clone(),
            size: self.primary_size_option.clone(),
            primary_image: self.primary_image.as_ref().map(ImageSummary::from),
            image_count: self.all_images.len(),
        }
    }
}

/// Serializable description of a product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub price: f64,
    pub url: String,
    pub description: String,
    pub model_url: String,
    pub size: String,
    pub primary_image: Option<ImageSummary>,
    pub image_count: usize,
}

/// Serializable description of an image handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl From<&ImageHandle> for ImageSummary {
    fn from(handle: &ImageHandle) -> Self {
        Self {
            url: handle.url().to_string(),
            width: handle.width(),
            height: handle.height(),
        }
    }
}
