//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::inventory::{Catalog, CatalogError, Inventory};
use crate::services::CartStore;

/// Application state shared across all handlers.
///
/// Cloning is cheap (`Arc`). Handlers receive it through axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    inventory: Inventory,
    carts: CartStore,
}

impl AppState {
    /// Create application state, seeding the inventory from the configured
    /// catalog file or the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or is invalid.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading catalog file");
                Catalog::load(path)?
            }
            None => Catalog::builtin()?,
        };
        Self::with_catalog(catalog)
    }

    /// Create application state from an already-loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is invalid.
    pub fn with_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        tracing::info!(
            categories = catalog.categories.len(),
            items = catalog.item_count(),
            "Inventory seeded"
        );
        let inventory = Inventory::new(catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                inventory,
                carts: CartStore::new(),
            }),
        })
    }

    /// Get a reference to the inventory.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inner.inventory
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }
}
