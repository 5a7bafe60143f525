//! Catalog file commands.

use std::path::{Path, PathBuf};

use pixel_store_storefront::inventory::{Catalog, CatalogFormat};
use tracing::info;

use super::CommandError;

/// Validate a catalog file and log a per-category summary.
///
/// Falls back to `STORE_CATALOG_PATH` (after loading `.env`) when `path` is
/// `None`.
///
/// # Errors
///
/// Returns an error if no path is available or the catalog fails to load.
pub fn check(path: Option<PathBuf>) -> Result<Catalog, CommandError> {
    let path = match path {
        Some(path) => path,
        None => {
            dotenvy::dotenv().ok();
            std::env::var("STORE_CATALOG_PATH")
                .map(PathBuf::from)
                .map_err(|_| CommandError::MissingPath)?
        }
    };

    info!(path = %path.display(), "Checking catalog");
    let catalog = Catalog::load(&path)?;

    for category in &catalog.categories {
        let stock: u64 = category.items.iter().map(|i| u64::from(i.quantity)).sum();
        info!(
            category = %category.name,
            items = category.items.len(),
            units = stock,
            "Category"
        );
    }
    info!(
        categories = catalog.categories.len(),
        items = catalog.item_count(),
        "Catalog is valid"
    );

    Ok(catalog)
}

/// Write the built-in catalog to `path`, choosing JSON or YAML by extension.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the file exists and
/// `force` is not set, or the write fails.
pub fn export(path: &Path, force: bool) -> Result<(), CommandError> {
    let format = CatalogFormat::from_path(path)?;
    if path.exists() && !force {
        return Err(CommandError::AlreadyExists(path.to_path_buf()));
    }

    let text = Catalog::builtin()?.render(format)?;
    std::fs::write(path, text).map_err(|source| CommandError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), ?format, "Built-in catalog exported");
    Ok(())
}
