//! Catalog items and the categories that own them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Price;

/// Normalize an item or category name for case-insensitive comparison.
///
/// Surrounding whitespace is ignored, so `" Pixel 8 "` and `"pixel 8"` match.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A product in the store catalog.
///
/// Item names are unique across the entire catalog when compared with
/// [`normalize_name`]; carts and orders refer to items by name alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name (e.g., "Pixel 8").
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Date the item went on sale.
    pub release_date: NaiveDate,
    /// Marketing description.
    #[serde(default)]
    pub description: String,
    /// Free-text feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Units remaining in stock.
    pub quantity: u32,
}

impl Item {
    /// Whether this item's name matches `name`, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}

/// A named grouping of items (e.g., "phone").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category label.
    pub name: String,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<Item>,
}
