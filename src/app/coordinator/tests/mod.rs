//! Unit tests for the catalog coordinator
//!
//! These tests drive the coordinator with an in-memory fetcher and a
//! recording observer. Integration tests through the public API are located
//! in the top-level tests directory.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};

use crate::app::catalog::Product;
use crate::app::client::ResourceFetcher;
use crate::app::presentation::CatalogObserver;
use crate::errors::{AppError, FetchError, FetchResult};

use super::*;

const CATALOG_URL: &str = "https://catalog.test/product.json";

/// In-memory fetcher serving one document and a set of PNG images
#[derive(Default)]
pub struct StubFetcher {
    documents: HashMap<String, String>,
    images: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.documents.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_image(mut self, url: &str, width: u32, height: u32) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba([200u8, 120, 40, 255]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(buffer)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        self.images.insert(url.to_string(), bytes.into_inner());
        self
    }

    /// Image requests in the order they were made
    pub fn image_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceFetcher for StubFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }

    async fn fetch_bytes(&self, url: &str) -> FetchResult<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.images.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Observer that records every callback
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
    ready_snapshots: Mutex<Vec<(String, Vec<Product>)>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn snapshot(&self, category: &str) -> Option<Vec<Product>> {
        self.ready_snapshots
            .lock()
            .unwrap()
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, products)| products.clone())
    }
}

impl CatalogObserver for RecordingObserver {
    fn on_category_ready(&self, category: &str, products: &[Product]) {
        self.events
            .lock()
            .unwrap()
            .push(format!("category:{}", category));
        self.ready_snapshots
            .lock()
            .unwrap()
            .push((category.to_string(), products.to_vec()));
    }

    fn on_catalog_ready(&self) {
        self.events.lock().unwrap().push("catalog".to_string());
    }

    fn on_load_failed(&self, error: &AppError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("failed:{}", error.category()));
    }
}

/// Create test coordinator configuration
pub fn create_test_config() -> CoordinatorConfig {
    CoordinatorConfig::default()
        .with_catalog_url(CATALOG_URL)
        .with_message_buffer_size(4)
}

fn coordinator(
    config: CoordinatorConfig,
    fetcher: StubFetcher,
) -> (CatalogCoordinator, Arc<StubFetcher>, Arc<RecordingObserver>) {
    let fetcher = Arc::new(fetcher);
    let observer = Arc::new(RecordingObserver::default());
    let coordinator = CatalogCoordinator::new(config, fetcher.clone(), observer.clone());
    (coordinator, fetcher, observer)
}

/// A single chair with one image completes its category and the catalog
#[tokio::test]
async fn test_single_product_flow() {
    let document = r#"[{
        "category": "Chair",
        "name": "Stool",
        "price_string": "49.5",
        "images": ["https://img.test/stool.png"]
    }]"#;
    let fetcher = StubFetcher::default()
        .with_document(CATALOG_URL, document)
        .with_image("https://img.test/stool.png", 4, 2);
    let (coordinator, _, observer) = coordinator(create_test_config(), fetcher);

    let result = coordinator.run().await.unwrap();

    assert_eq!(observer.events(), vec!["category:chair", "catalog"]);
    assert!(result.catalog_ready);
    assert_eq!(result.ready_categories, vec!["chair"]);

    let stool = &result.catalog.bucket("chair").unwrap()[0];
    assert_eq!(stool.name, "Stool");
    assert_eq!(stool.price, 49.5);
    let primary = stool.primary_image.as_ref().unwrap();
    assert_eq!(primary.width(), 4);
    assert_eq!(stool.all_images.len(), 1);

    // The bucket handed to the observer already carried the primary image
    let snapshot = observer.snapshot("chair").unwrap();
    assert!(snapshot[0].has_primary_image());

    assert_eq!(result.stats.total_products, 1);
    assert_eq!(result.stats.categories, 4);
    assert_eq!(result.stats.category_ready_events, 1);
    assert_eq!(result.stats.catalog_ready_events, 1);
}

#[tokio::test]
async fn test_malformed_document_fails_without_ready_events() {
    let fetcher = StubFetcher::default().with_document(CATALOG_URL, "{ not json");
    let (coordinator, fetcher, observer) = coordinator(create_test_config(), fetcher);

    let result = coordinator.run().await;

    assert!(matches!(result, Err(AppError::Decode(_))));
    assert_eq!(observer.events(), vec!["failed:decode"]);
    assert!(fetcher.image_requests().is_empty());
}

#[tokio::test]
async fn test_document_fetch_failure_is_reported() {
    let (coordinator, _, observer) = coordinator(create_test_config(), StubFetcher::default());

    let result = coordinator.run().await;

    assert!(matches!(result, Err(AppError::Fetch(_))));
    assert_eq!(observer.events(), vec!["failed:fetch"]);
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let config = create_test_config().with_message_buffer_size(0);
    let (coordinator, _, observer) = coordinator(config, StubFetcher::default());

    let result = coordinator.run_with_document("[]").await;

    assert!(matches!(result, Err(AppError::Config(_))));
    assert_eq!(observer.events(), vec!["failed:config"]);
}

/// A failed primary falls through to the next URL and that URL is not
/// requested again by the background step
#[tokio::test]
async fn test_fallback_primary_without_duplicate_requests() {
    let document = r#"[{
        "category": "desk",
        "name": "Writing Desk",
        "price_string": "310",
        "images": ["https://img.test/missing.png", "https://img.test/b.png", "https://img.test/c.png"]
    }]"#;
    let fetcher = StubFetcher::default()
        .with_image("https://img.test/b.png", 3, 3)
        .with_image("https://img.test/c.png", 5, 5);
    let (coordinator, fetcher, _) = coordinator(create_test_config(), fetcher);

    let result = coordinator.run_with_document(document).await.unwrap();

    let desk = &result.catalog.bucket("desk").unwrap()[0];
    assert_eq!(
        desk.primary_image.as_ref().unwrap().url(),
        "https://img.test/b.png"
    );
    let urls: Vec<&str> = desk.all_images.iter().map(|i| i.url()).collect();
    assert_eq!(urls, vec!["https://img.test/b.png", "https://img.test/c.png"]);

    assert_eq!(
        fetcher.image_requests(),
        vec![
            "https://img.test/missing.png",
            "https://img.test/b.png",
            "https://img.test/c.png"
        ]
    );
    assert_eq!(result.stats.failed_image_fetches, 1);
    assert_eq!(result.stats.extra_images, 1);
}

/// Products whose images all fail still count towards completion
#[tokio::test]
async fn test_failed_images_do_not_block_completion() {
    let document = r#"[
        {"category": "sofa", "name": "Loveseat", "price_string": "n/a", "images": ["https://img.test/gone.png"]},
        {"category": "sofa", "name": "Sectional", "price_string": "999", "images": []}
    ]"#;
    let (coordinator, fetcher, observer) = coordinator(create_test_config(), StubFetcher::default());

    let result = coordinator.run_with_document(document).await.unwrap();

    assert_eq!(observer.events(), vec!["category:sofa", "catalog"]);
    let sofas = result.catalog.bucket("sofa").unwrap();
    assert_eq!(sofas[0].price, 0.0);
    assert!(sofas.iter().all(|p| p.primary_image.is_none()));

    // Only the one listed URL was requested; the empty list made no calls
    assert_eq!(fetcher.image_requests(), vec!["https://img.test/gone.png"]);
    assert_eq!(result.stats.missing_primary_images, 2);
}

#[tokio::test]
async fn test_empty_catalog_is_ready_immediately() {
    let (coordinator, fetcher, observer) = coordinator(create_test_config(), StubFetcher::default());

    let result = coordinator.run_with_document("[]").await.unwrap();

    assert_eq!(observer.events(), vec!["catalog"]);
    assert!(result.catalog_ready);
    assert!(result.catalog.is_empty());
    assert_eq!(result.catalog.categories().count(), 4);
    assert!(fetcher.image_requests().is_empty());
}

/// New categories get buckets after the initial ones, and every category
/// is announced before the catalog
#[tokio::test]
async fn test_categories_announced_before_catalog() {
    let document = r#"[
        {"category": "Lamp", "name": "Arc Lamp", "price_string": "80", "images": ["https://img.test/lamp.png"]},
        {"category": "CHAIR", "name": "Stool", "price_string": "40", "images": ["https://img.test/stool.png"]},
        {"category": "lamp", "name": "Desk Lamp", "price_string": "30", "images": []}
    ]"#;
    let fetcher = StubFetcher::default()
        .with_image("https://img.test/lamp.png", 1, 1)
        .with_image("https://img.test/stool.png", 1, 1);
    let (coordinator, _, observer) = coordinator(create_test_config(), fetcher);

    let result = coordinator.run_with_document(document).await.unwrap();

    let categories: Vec<&str> = result.catalog.categories().collect();
    assert_eq!(categories, vec!["chair", "desk", "drawer", "sofa", "lamp"]);
    assert_eq!(result.catalog.bucket("lamp").unwrap().len(), 2);

    let events = observer.events();
    assert_eq!(events.last().map(String::as_str), Some("catalog"));
    assert_eq!(events.iter().filter(|e| *e == "catalog").count(), 1);
    assert!(events.contains(&"category:chair".to_string()));
    assert!(events.contains(&"category:lamp".to_string()));

    let mut ready = result.ready_categories.clone();
    ready.sort();
    assert_eq!(ready, vec!["chair", "lamp"]);
}

#[tokio::test]
async fn test_once_policy_run() {
    let document = r#"[
        {"category": "drawer", "name": "Dresser", "price_string": "150", "images": []},
        {"category": "drawer", "name": "Nightstand", "price_string": "70", "images": []}
    ]"#;
    let config = create_test_config().with_ready_policy(ReadySignalPolicy::Once);
    let (coordinator, _, observer) = coordinator(config, StubFetcher::default());

    let result = coordinator.run_with_document(document).await.unwrap();

    assert_eq!(observer.events(), vec!["category:drawer", "catalog"]);
    assert_eq!(result.stats.category_ready_events, 1);
}

#[tokio::test]
async fn test_run_with_document_skips_network_fetch() {
    let document = r#"[{"category": "chair", "name": "Stool", "price_string": "40"}]"#;
    let (coordinator, fetcher, _) = coordinator(
        create_test_config().with_catalog_url("https://unreachable.test/catalog.json"),
        StubFetcher::default(),
    );

    let result = coordinator.run_with_document(document).await.unwrap();
    assert_eq!(result.catalog.len(), 1);
    assert!(fetcher.image_requests().is_empty());
    assert_eq!(coordinator.config().message_buffer_size, 4);
}
