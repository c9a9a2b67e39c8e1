//! Integration tests for the catalog pipeline
//!
//! These tests drive the public API end to end with an in-memory transport:
//! decode, bucketing, image fallback, background retrieval and the ready
//! events seen by an observer.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use tokio_test::{assert_err, assert_ok};

use catalog_fetcher::app::{
    CatalogCoordinator, CatalogObserver, CoordinatorConfig, Product, ReadySignalPolicy,
    ResourceFetcher,
};
use catalog_fetcher::errors::{AppError, FetchError, FetchResult};

const CATALOG_URL: &str = "https://catalog.test/product.json";

/// Serves a catalog document and JPEG/PNG images from memory
#[derive(Default)]
struct MemoryTransport {
    documents: HashMap<String, String>,
    assets: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryTransport {
    fn document(mut self, url: &str, body: &str) -> Self {
        self.documents.insert(url.to_string(), body.to_string());
        self
    }

    fn image(mut self, url: &str, format: ImageFormat) -> Self {
        let buffer = ImageBuffer::from_pixel(8, 6, Rgb([90u8, 60, 30]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(buffer)
            .write_to(&mut bytes, format)
            .unwrap();
        self.assets.insert(url.to_string(), bytes.into_inner());
        self
    }

    fn raw(mut self, url: &str, bytes: &[u8]) -> Self {
        self.assets.insert(url.to_string(), bytes.to_vec());
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceFetcher for MemoryTransport {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        self.documents.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }

    async fn fetch_bytes(&self, url: &str) -> FetchResult<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.assets.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Category(String, usize),
    Catalog,
    Failed,
}

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<Seen>>,
}

impl Recorder {
    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

impl CatalogObserver for Recorder {
    fn on_category_ready(&self, category: &str, products: &[Product]) {
        self.seen
            .lock()
            .unwrap()
            .push(Seen::Category(category.to_string(), products.len()));
    }

    fn on_catalog_ready(&self) {
        self.seen.lock().unwrap().push(Seen::Catalog);
    }

    fn on_load_failed(&self, _error: &AppError) {
        self.seen.lock().unwrap().push(Seen::Failed);
    }
}

fn pipeline(
    transport: MemoryTransport,
    policy: ReadySignalPolicy,
) -> (CatalogCoordinator, Arc<MemoryTransport>, Arc<Recorder>) {
    let transport = Arc::new(transport);
    let recorder = Arc::new(Recorder::default());
    let config = CoordinatorConfig::default()
        .with_catalog_url(CATALOG_URL)
        .with_ready_policy(policy);
    let coordinator = CatalogCoordinator::new(config, transport.clone(), recorder.clone());
    (coordinator, transport, recorder)
}

/// `[{chair, []}, {chair, ["bad-url"]}]`: chair is ready once with both
/// products, the second without a thumbnail, then the catalog is ready
#[tokio::test]
async fn test_chair_with_one_bad_image() {
    let document = r#"[
        {"category": "chair", "name": "Stool", "price_string": "45", "images": []},
        {"category": "chair", "name": "Rocker", "price_string": "120", "images": ["bad-url"]}
    ]"#;
    let transport = MemoryTransport::default().document(CATALOG_URL, document);
    let (coordinator, transport, recorder) = pipeline(transport, ReadySignalPolicy::EveryCheck);

    let result = assert_ok!(coordinator.run().await);

    assert_eq!(
        recorder.seen(),
        vec![Seen::Category("chair".to_string(), 2), Seen::Catalog]
    );

    let chairs = result.catalog.bucket("chair").unwrap();
    assert_eq!(chairs.len(), 2);
    assert!(chairs[0].primary_image.is_none());
    assert!(chairs[1].primary_image.is_none());
    assert_eq!(transport.requests(), vec!["bad-url"]);
}

#[tokio::test]
async fn test_malformed_catalog_aborts_before_images() {
    let transport = MemoryTransport::default().document(CATALOG_URL, r#"[{"name": "no category"}]"#);
    let (coordinator, transport, recorder) = pipeline(transport, ReadySignalPolicy::EveryCheck);

    let error = assert_err!(coordinator.run().await);

    assert!(error.is_fatal());
    assert_eq!(error.category(), "decode");
    assert_eq!(recorder.seen(), vec![Seen::Failed]);
    assert!(transport.requests().is_empty());
}

/// Mixed formats, an undecodable payload and a missing image across two
/// categories
#[tokio::test]
async fn test_full_catalog_hydration() {
    let document = r#"[
        {
            "category": "Desk",
            "name": "Standing Desk",
            "price_string": "1,250.00",
            "url": "https://shop.test/standing-desk",
            "description": "Height adjustable",
            "model_url": "https://models.test/desk.glb",
            "size_options": ["120x60", "140x70"],
            "images": ["https://img.test/desk.html", "https://img.test/desk.jpg", "https://img.test/desk-side.png"]
        },
        {
            "category": "sofa",
            "name": "Sectional",
            "price_string": null,
            "images": ["https://img.test/sofa.png", "https://img.test/missing.png"]
        }
    ]"#;
    let transport = MemoryTransport::default()
        .document(CATALOG_URL, document)
        .raw("https://img.test/desk.html", b"<html>not an image</html>")
        .image("https://img.test/desk.jpg", ImageFormat::Jpeg)
        .image("https://img.test/desk-side.png", ImageFormat::Png)
        .image("https://img.test/sofa.png", ImageFormat::Png);
    let (coordinator, transport, recorder) = pipeline(transport, ReadySignalPolicy::Once);

    let result = assert_ok!(coordinator.run().await);

    let desk = result.catalog.find_product("standing desk").unwrap();
    assert_eq!(desk.category, "desk");
    assert_eq!(desk.price, 1250.0);
    assert_eq!(desk.primary_size_option, "120x60");
    assert!(!desk.origin_flag);
    assert_eq!(desk.primary_image.as_ref().unwrap().url(), "https://img.test/desk.jpg");
    assert_eq!(desk.all_images.len(), 2);
    assert_eq!(desk.all_images[0].url(), "https://img.test/desk.jpg");

    let sofa = result.catalog.find_product("Sectional").unwrap();
    assert_eq!(sofa.price, 0.0);
    assert_eq!(sofa.all_images.len(), 1);

    // Every URL was requested exactly once
    let mut requests = transport.requests();
    requests.sort();
    let before = requests.len();
    requests.dedup();
    assert_eq!(before, requests.len());
    assert_eq!(before, 5);

    let seen = recorder.seen();
    assert_eq!(seen.last(), Some(&Seen::Catalog));
    assert!(seen.contains(&Seen::Category("desk".to_string(), 1)));
    assert!(seen.contains(&Seen::Category("sofa".to_string(), 1)));

    assert!(result.catalog_ready);
    assert_eq!(result.stats.primary_images, 2);
    assert_eq!(result.stats.extra_images, 1);
    assert_eq!(result.stats.failed_image_fetches, 2);
    assert_eq!(result.stats.failed_tasks, 0);
}

#[tokio::test]
async fn test_catalog_summary_serializes() {
    let document = r#"[{"category": "drawer", "name": "Dresser", "price_string": "199", "images": ["https://img.test/d.png"]}]"#;
    let transport = MemoryTransport::default()
        .document(CATALOG_URL, document)
        .image("https://img.test/d.png", ImageFormat::Png);
    let (coordinator, _, _) = pipeline(transport, ReadySignalPolicy::EveryCheck);

    let result = assert_ok!(coordinator.run().await);
    let json = serde_json::to_value(result.catalog.summary()).unwrap();

    let drawer = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["category"] == "drawer")
        .unwrap();
    assert_eq!(drawer["products"][0]["name"], "Dresser");
    assert_eq!(drawer["products"][0]["primary_image"]["width"], 8);
    assert_eq!(drawer["products"][0]["image_count"], 1);
}
