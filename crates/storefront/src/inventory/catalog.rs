//! Catalog files: the category → items mapping the inventory starts from.
//!
//! A catalog is either the built-in default (`catalog/default.json`, compiled
//! into the binary) or a JSON/YAML file named by `STORE_CATALOG_PATH`.
//!
//! ```json
//! { "categories": [ { "name": "phone", "items": [ { "name": "Pixel 8", ... } ] } ] }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pixel_store_core::{Category, normalize_name};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CATALOG: &str = include_str!("../../catalog/default.json");

/// Errors loading, parsing, or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported catalog format for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("catalog has a category with an empty name")]
    EmptyCategoryName,
    #[error("category '{0}' appears more than once")]
    DuplicateCategory(String),
    #[error("category '{0}' has an item with an empty name")]
    EmptyItemName(String),
    #[error("item '{0}' appears more than once (names are unique across the catalog, ignoring case)")]
    DuplicateItem(String),
}

/// On-disk catalog encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Pick a format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// An ordered list of categories and their items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    /// The built-in catalog of phones, watches and headphones.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded catalog is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(DEFAULT_CATALOG, CatalogFormat::Json)
    }

    /// Parse and validate a catalog from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or fails [`Catalog::validate`].
    pub fn parse(text: &str, format: CatalogFormat) -> Result<Self, CatalogError> {
        let catalog: Self = match format {
            CatalogFormat::Json => serde_json::from_str(text)?,
            CatalogFormat::Yaml => serde_yaml::from_str(text)?,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// does not parse, or fails validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let format = CatalogFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, format)
    }

    /// Serialize the catalog in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(&self, format: CatalogFormat) -> Result<String, CatalogError> {
        Ok(match format {
            CatalogFormat::Json => serde_json::to_string_pretty(self)?,
            CatalogFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    /// Check the catalog's naming invariants.
    ///
    /// Category names must be non-empty and unique. Item names must be
    /// non-empty and unique across every category, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut categories = HashSet::new();
        let mut items = HashSet::new();

        for category in &self.categories {
            let key = normalize_name(&category.name);
            if key.is_empty() {
                return Err(CatalogError::EmptyCategoryName);
            }
            if !categories.insert(key) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }

            for item in &category.items {
                let key = normalize_name(&item.name);
                if key.is_empty() {
                    return Err(CatalogError::EmptyItemName(category.name.clone()));
                }
                if !items.insert(key) {
                    return Err(CatalogError::DuplicateItem(item.name.clone()));
                }
            }
        }

        Ok(())
    }

    /// Total number of items across all categories.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}
