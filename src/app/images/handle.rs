//! Decoded image handles

use std::fmt;
use std::sync::Arc;

use image::DynamicImage;

use crate::errors::{FetchError, FetchResult};

/// A decoded bitmap together with the URL it came from
///
/// Cloning is cheap; clones share the same bitmap and compare equal.
#[derive(Clone)]
pub struct ImageHandle {
    url: String,
    bitmap: Arc<DynamicImage>,
}

impl ImageHandle {
    /// Decode an image payload, guessing the format from its content
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ImageDecode` if the payload is not a supported image
    pub fn decode(url: &str, bytes: &[u8]) -> FetchResult<Self> {
        let bitmap = image::load_from_memory(bytes).map_err(|e| FetchError::ImageDecode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            url: url.to_string(),
            bitmap: Arc::new(bitmap),
        })
    }

    /// Decode on the blocking thread pool
    pub async fn decode_blocking(url: String, bytes: Vec<u8>) -> FetchResult<Self> {
        tokio::task::spawn_blocking(move || Self::decode(&url, &bytes))
            .await
            .map_err(|e| FetchError::Other(format!("Image decode task failed: {}", e)))?
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn bitmap(&self) -> &DynamicImage {
        &self.bitmap
    }

    /// Width divided by height; zero for a degenerate bitmap
    pub fn aspect_ratio(&self) -> f64 {
        if self.height() == 0 {
            return 0.0;
        }
        f64::from(self.width()) / f64::from(self.height())
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && Arc::ptr_eq(&self.bitmap, &other.bitmap)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("url", &self.url)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
