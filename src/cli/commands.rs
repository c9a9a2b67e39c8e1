//! Command handlers for Catalog Fetcher CLI
//!
//! This module implements the command handlers that coordinate between
//! CLI arguments, the loaded configuration and the core pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::app::catalog::CatalogSummary;
use crate::app::{
    CatalogClient, CatalogCoordinator, CatalogObserver, ModelLoader, PipelineStats, Product,
    ProductActions, ProductInfoHandler, ReadySignalPolicy, SessionResult,
};
use crate::cli::{ConfigAction, ConfigArgs, FetchArgs, LoadingIndicator, ProgressConfig};
use crate::config::AppConfig;
use crate::errors::{AppError, FetchError, Result};

/// Handle the fetch command
///
/// Loads the catalog (from the network or a local file), hydrates its
/// images and prints a summary. Product actions requested on the command
/// line run once loading completes.
pub async fn handle_fetch(args: FetchArgs, config: AppConfig, quiet: bool) -> Result<()> {
    let start_time = Instant::now();
    args.validate().map_err(AppError::generic)?;

    let (mut coordinator_config, client_config) = config.to_runtime_config();
    if let Some(url) = &args.url {
        coordinator_config = coordinator_config.with_catalog_url(url.clone());
    }
    if args.once {
        coordinator_config = coordinator_config.with_ready_policy(ReadySignalPolicy::Once);
    }

    let client = Arc::new(CatalogClient::with_config(client_config)?);
    let indicator = Arc::new(LoadingIndicator::new(indicator_config(&args, quiet))?);
    let coordinator = CatalogCoordinator::new(coordinator_config, client, indicator.clone());

    let result = match &args.file {
        Some(path) => {
            indicator.start(&format!("Loading catalog from {}", path.display()));
            let document = match read_local_document(path).await {
                Ok(document) => document,
                Err(e) => {
                    indicator.on_load_failed(&e);
                    return Err(e);
                }
            };
            coordinator.run_with_document(&document).await?
        }
        None => {
            indicator.start(&format!(
                "Loading catalog from {}",
                coordinator.config().catalog_url
            ));
            coordinator.run().await?
        }
    };

    info!("Fetch completed in {:?}", start_time.elapsed());

    if args.json {
        print_json_report(&result)?;
    } else if !quiet {
        print_summary(&result);
    }

    run_product_actions(&args, &result);
    Ok(())
}

/// Spinner and category lines are shown only for interactive text output
fn indicator_config(args: &FetchArgs, quiet: bool) -> ProgressConfig {
    let interactive = !quiet && !args.json;
    ProgressConfig {
        enable_spinner: interactive,
        show_categories: interactive,
        ..Default::default()
    }
}

/// Handle the config command
pub async fn handle_config(
    args: ConfigArgs,
    config: AppConfig,
    source: Option<PathBuf>,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            match source {
                Some(path) => println!("Loaded from: {}", path.display()),
                None => println!("No configuration file found, using defaults"),
            }
            match AppConfig::default_config_path() {
                Ok(path) => println!("User config location: {}", path.display()),
                Err(e) => warn!("{}", e),
            }
        }
    }
    Ok(())
}

async fn read_local_document(path: &Path) -> Result<String> {
    debug!("Reading catalog document from {}", path.display());
    tokio::fs::read_to_string(path).await.map_err(|source| {
        AppError::from(FetchError::LocalDocument {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// JSON shape printed by `fetch --json`
#[derive(Debug, Serialize)]
struct FetchReport<'a> {
    stats: &'a PipelineStats,
    ready_categories: &'a [String],
    catalog_ready: bool,
    catalog: CatalogSummary,
}

fn print_json_report(result: &SessionResult) -> Result<()> {
    let report = FetchReport {
        stats: &result.stats,
        ready_categories: &result.ready_categories,
        catalog_ready: result.catalog_ready,
        catalog: result.catalog.summary(),
    };
    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::generic(format!("Failed to render report: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

fn print_summary(result: &SessionResult) {
    let stats = &result.stats;

    println!("\n📊 Catalog Summary:");
    for (category, products) in result.catalog.iter() {
        println!("  {}: {} products", category, products.len());
    }
    println!("  Total products: {}", stats.total_products);
    println!(
        "  With thumbnail: {} ({:.1}%)",
        stats.primary_images,
        stats.primary_success_rate()
    );
    println!("  Without thumbnail: {}", stats.missing_primary_images);
    println!("  Additional images: {}", stats.extra_images);
    println!("  Failed image requests: {}", stats.failed_image_fetches);
    println!("  Load time: {:?}", stats.session_duration);
    if stats.failed_tasks > 0 {
        println!("  ⚠️  Image tasks that did not finish: {}", stats.failed_tasks);
    }
}

fn run_product_actions(args: &FetchArgs, result: &SessionResult) {
    if args.details.is_none() && args.ar.is_none() {
        return;
    }

    let actions = ProductActions::new(Arc::new(ConsoleProductInfo), Arc::new(ConsoleModelLoader));

    if let Some(name) = &args.details {
        match result.catalog.find_product(name) {
            Some(product) => actions.view_details(product),
            None => println!("❌ No product named {:?}", name),
        }
    }

    if let Some(name) = &args.ar {
        match result.catalog.find_product(name) {
            Some(product) => {
                if !actions.view_in_ar(product) {
                    println!("❌ {} has no 3D model", product.name);
                }
            }
            None => println!("❌ No product named {:?}", name),
        }
    }
}

/// Prints a product's details to stdout
struct ConsoleProductInfo;

impl ProductInfoHandler for ConsoleProductInfo {
    fn show_product_info(&self, product: &Product) {
        println!("\n🪑 {}", product.name);
        println!("  Category: {}", product.category);
        println!("  Price: {:.2}", product.price);
        if !product.primary_size_option.is_empty() {
            println!("  Size: {}", product.primary_size_option);
        }
        if !product.description.is_empty() {
            println!("  Description: {}", product.description);
        }
        if !product.url.is_empty() {
            println!("  Link: {}", product.url);
        }
        match &product.primary_image {
            Some(image) => println!(
                "  Thumbnail: {} ({}x{})",
                image.url(),
                image.width(),
                image.height()
            ),
            None => println!("  Thumbnail: none"),
        }
        println!("  Images: {}", product.all_images.len());
    }
}

/// Reports the model a viewer would load
struct ConsoleModelLoader;

impl ModelLoader for ConsoleModelLoader {
    fn load_model(&self, model_url: &str, product: &Product) {
        info!("Loading model for {:?} from {}", product.name, model_url);
        println!("\n📦 AR model for {}: {}", product.name, model_url);
    }
}
