//! Shopping cart line items.

use serde::{Deserialize, Serialize};

/// One line in a session's shopping cart.
///
/// Entries are never merged: adding the same item twice produces two entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartEntry {
    /// Catalog name of the item.
    pub item: String,
    /// Units requested.
    pub quantity: u32,
}

impl CartEntry {
    /// Create a new cart entry.
    #[must_use]
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }

    /// Whether this entry is exactly `(item, quantity)`, comparing the item
    /// name case-insensitively.
    #[must_use]
    pub fn is_exactly(&self, item: &str, quantity: u32) -> bool {
        self.quantity == quantity && crate::normalize_name(&self.item) == crate::normalize_name(item)
    }
}
