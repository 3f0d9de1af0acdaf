//! Seed the product catalog.
//!
//! Reads a catalog YAML document (the built-in sample by default) and inserts
//! its products when the catalog table is empty. Run `migrate` first.

use std::path::Path;

use tracing::info;

use odyssey_storefront::db::{self, PgCatalogStore};
use odyssey_storefront::services::{SeedCatalog, seed_if_empty};

use super::{CommandError, database_url};

/// Seed products from `file`, or the sample catalog when `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a product is
/// invalid, or database operations fail.
pub async fn products(file: Option<&Path>) -> Result<(), CommandError> {
    let database_url = database_url()?;

    // Read and validate YAML before connecting to database
    let catalog = match file {
        Some(path) => {
            info!(path = %path.display(), "Loading catalog from file");
            SeedCatalog::from_file(path).await?
        }
        None => {
            info!("Using built-in sample catalog");
            SeedCatalog::sample()?
        }
    };
    catalog.clone().into_products()?;
    info!(products = catalog.products.len(), "Catalog validated");

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let inserted = seed_if_empty(&PgCatalogStore::new(pool.clone()), &catalog).await?;
    pool.close().await;

    if inserted == 0 {
        info!("Catalog already has products; nothing inserted");
    } else {
        info!(inserted, "Seeding complete!");
    }
    Ok(())
}
