//! Per-product image retrieval
//!
//! Each product gets one task. The task first resolves the primary image,
//! trying the product's URLs one after another until one succeeds, and
//! reports that resolution to the coordinator exactly once. Only then does
//! it go on to retrieve the remaining images, which are reported as they
//! arrive and never affect completion tracking.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::handle::ImageHandle;
use crate::app::catalog::ProductKey;
use crate::app::client::ResourceFetcher;
use crate::errors::FetchResult;

/// Image work for one product
#[derive(Debug, Clone, PartialEq)]
pub struct ImageJob {
    /// Where the product lives in the catalog
    pub key: ProductKey,
    /// Product name, for log messages
    pub product_name: String,
    /// Image URLs in display order
    pub urls: Vec<String>,
}

/// Results sent from image tasks to the coordinator
#[derive(Debug)]
pub enum FetchMessage {
    /// The primary attempt concluded; `image` is `None` if every URL failed
    PrimaryResolved {
        key: ProductKey,
        image: Option<ImageHandle>,
    },
    /// A remaining image was retrieved in the background
    ImageAppended { key: ProductKey, image: ImageHandle },
    /// A single image request failed
    ImageFailed {
        key: ProductKey,
        url: String,
        error: String,
    },
}

/// Retrieves and decodes product images through a [`ResourceFetcher`]
pub struct ImageFetcher {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl ImageFetcher {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self { fetcher }
    }

    /// Runs the full image work for one product
    ///
    /// Stops early only if the coordinator has gone away.
    pub async fn hydrate(&self, job: ImageJob, tx: mpsc::Sender<FetchMessage>) {
        let ImageJob {
            key,
            product_name,
            urls,
        } = job;

        if urls.is_empty() {
            debug!("Product {:?} has no images", product_name);
            let _ = tx
                .send(FetchMessage::PrimaryResolved { key, image: None })
                .await;
            return;
        }

        let (primary, next_index) = self.fetch_primary(&key, &urls, &tx).await;
        if primary.is_none() {
            warn!("All image downloads failed for product {:?}", product_name);
        }

        let resolved = FetchMessage::PrimaryResolved {
            key: key.clone(),
            image: primary,
        };
        if tx.send(resolved).await.is_err() {
            debug!("Coordinator closed before {:?} resolved", product_name);
            return;
        }

        self.fetch_remaining(&key, &urls, next_index, &tx).await;
    }

    /// Tries each URL in order until one yields an image
    ///
    /// Returns the image, if any, and the index of the first URL that was
    /// not attempted.
    async fn fetch_primary(
        &self,
        key: &ProductKey,
        urls: &[String],
        tx: &mpsc::Sender<FetchMessage>,
    ) -> (Option<ImageHandle>, usize) {
        for (index, url) in urls.iter().enumerate() {
            match self.fetch_image(url).await {
                Ok(image) => {
                    debug!("Primary image for {:?} from URL #{}", key, index);
                    return (Some(image), index + 1);
                }
                Err(e) => {
                    if index == 0 {
                        warn!("Failed to download primary image {}: {}", url, e);
                    } else {
                        warn!("Failed to download fallback image {}: {}", url, e);
                    }
                    report_failure(tx, key, url, e.to_string()).await;
                }
            }
        }

        (None, urls.len())
    }

    /// Retrieves the images the primary step did not attempt
    ///
    /// Index 0 is always consumed by the primary step, and URLs that already
    /// failed there are not requested again.
    async fn fetch_remaining(
        &self,
        key: &ProductKey,
        urls: &[String],
        next_index: usize,
        tx: &mpsc::Sender<FetchMessage>,
    ) {
        for url in urls.iter().skip(next_index.max(1)) {
            match self.fetch_image(url).await {
                Ok(image) => {
                    let appended = FetchMessage::ImageAppended {
                        key: key.clone(),
                        image,
                    };
                    if tx.send(appended).await.is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("Failed to download additional image {}: {}", url, e);
                    report_failure(tx, key, url, e.to_string()).await;
                }
            }
        }
    }

    async fn fetch_image(&self, url: &str) -> FetchResult<ImageHandle> {
        let bytes = self.fetcher.fetch_bytes(url).await?;
        ImageHandle::decode_blocking(url.to_string(), bytes).await
    }
}

async fn report_failure(
    tx: &mpsc::Sender<FetchMessage>,
    key: &ProductKey,
    url: &str,
    error: String,
) {
    let _ = tx
        .send(FetchMessage::ImageFailed {
            key: key.clone(),
            url: url.to_string(),
            error,
        })
        .await;
}
