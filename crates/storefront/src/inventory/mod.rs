//! In-memory inventory: categories of items with remaining stock.
//!
//! The inventory is built once from a [`Catalog`] and is only mutated by
//! order fulfillment through [`Inventory::decrement_stock`]. Item lookup is
//! case-insensitive and served from a lowercased-name index built at
//! construction time.

mod catalog;

pub use catalog::{Catalog, CatalogError, CatalogFormat};

use std::collections::HashMap;
use std::sync::RwLock;

use pixel_store_core::{Category, Item, normalize_name};
use thiserror::Error;
use tracing::instrument;

/// Errors from inventory lookups and stock changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Item '{0}' not found")]
    ItemNotFound(String),
    #[error("Insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: u64,
        available: u32,
    },
    #[error("inventory lock poisoned")]
    LockPoisoned,
}

/// Position of an item: (category index, item index).
type Slot = (usize, usize);

struct Stock {
    categories: Vec<Category>,
    by_category: HashMap<String, usize>,
    by_name: HashMap<String, Slot>,
}

impl Stock {
    fn item(&self, (c, i): Slot) -> Option<&Item> {
        self.categories.get(c).and_then(|cat| cat.items.get(i))
    }

    fn item_mut(&mut self, (c, i): Slot) -> Option<&mut Item> {
        self.categories
            .get_mut(c)
            .and_then(|cat| cat.items.get_mut(i))
    }
}

/// The store's inventory.
pub struct Inventory {
    stock: RwLock<Stock>,
}

impl Inventory {
    /// Build an inventory from a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fails validation (for example, two items
    /// share a name ignoring case).
    pub fn new(catalog: Catalog) -> Result<Self, CatalogError> {
        catalog.validate()?;

        let mut by_category = HashMap::new();
        let mut by_name = HashMap::new();
        for (c, category) in catalog.categories.iter().enumerate() {
            by_category.insert(normalize_name(&category.name), c);
            for (i, item) in category.items.iter().enumerate() {
                by_name.insert(normalize_name(&item.name), (c, i));
            }
        }

        Ok(Self {
            stock: RwLock::new(Stock {
                categories: catalog.categories,
                by_category,
                by_name,
            }),
        })
    }

    /// Category labels in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::LockPoisoned`] if the lock is poisoned.
    pub fn categories(&self) -> Result<Vec<String>, InventoryError> {
        let stock = self
            .stock
            .read()
            .map_err(|_| InventoryError::LockPoisoned)?;
        Ok(stock.categories.iter().map(|c| c.name.clone()).collect())
    }

    /// Items in `category` (case-insensitive), or an empty list if the
    /// category does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::LockPoisoned`] if the lock is poisoned.
    pub fn list_items(&self, category: &str) -> Result<Vec<Item>, InventoryError> {
        let stock = self
            .stock
            .read()
            .map_err(|_| InventoryError::LockPoisoned)?;
        Ok(stock
            .by_category
            .get(&normalize_name(category))
            .and_then(|&c| stock.categories.get(c))
            .map(|c| c.items.clone())
            .unwrap_or_default())
    }

    /// Find an item by name across all categories, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::LockPoisoned`] if the lock is poisoned.
    pub fn find_item(&self, name: &str) -> Result<Option<Item>, InventoryError> {
        let stock = self
            .stock
            .read()
            .map_err(|_| InventoryError::LockPoisoned)?;
        Ok(stock
            .by_name
            .get(&normalize_name(name))
            .and_then(|&slot| stock.item(slot))
            .cloned())
    }

    /// Remove `quantity` units of `name` from stock, returning what remains.
    ///
    /// The check and the subtraction happen under one write lock. On failure
    /// the inventory is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ItemNotFound`] for an unknown item and
    /// [`InventoryError::InsufficientStock`] if `quantity` exceeds what is left.
    #[instrument(skip(self))]
    pub fn decrement_stock(&self, name: &str, quantity: u32) -> Result<u32, InventoryError> {
        let mut stock = self
            .stock
            .write()
            .map_err(|_| InventoryError::LockPoisoned)?;

        let slot = stock
            .by_name
            .get(&normalize_name(name))
            .copied()
            .ok_or_else(|| InventoryError::ItemNotFound(name.to_string()))?;
        let item = stock
            .item_mut(slot)
            .ok_or_else(|| InventoryError::ItemNotFound(name.to_string()))?;

        if quantity > item.quantity {
            return Err(InventoryError::InsufficientStock {
                item: item.name.clone(),
                requested: u64::from(quantity),
                available: item.quantity,
            });
        }

        item.quantity -= quantity;
        tracing::debug!(item = %item.name, remaining = item.quantity, "Stock decremented");
        Ok(item.quantity)
    }

    /// Poison the stock lock, as a panic while holding it would.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let holder = scope.spawn(|| {
                let _guard = self.stock.write();
                panic!("poisoning inventory lock");
            });
            assert!(holder.join().is_err());
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn inventory() -> Inventory {
        Inventory::new(Catalog::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_list_items_by_category() {
        let inv = inventory();
        let phones: Vec<String> = inv
            .list_items("phone")
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(phones, ["Pixel 8", "Pixel 7a", "Pixel Fold"]);
    }

    #[test]
    fn test_list_items_ignores_case() {
        let inv = inventory();
        assert_eq!(inv.list_items("WATCH").unwrap().len(), 2);
    }

    #[test]
    fn test_list_items_unknown_category_is_empty() {
        let inv = inventory();
        assert!(inv.list_items("tablet").unwrap().is_empty());
    }

    #[test]
    fn test_categories_in_order() {
        assert_eq!(
            inventory().categories().unwrap(),
            ["phone", "watch", "headphones"]
        );
    }

    #[test]
    fn test_find_item_across_categories() {
        let inv = inventory();
        let item = inv.find_item("pixel buds pro").unwrap().unwrap();
        assert_eq!(item.name, "Pixel Buds Pro");
        assert!(inv.find_item("Pixel 9").unwrap().is_none());
    }

    #[test]
    fn test_decrement_stock() {
        let inv = inventory();
        assert_eq!(inv.decrement_stock("Pixel 8", 4).unwrap(), 6);
        assert_eq!(inv.find_item("Pixel 8").unwrap().unwrap().quantity, 6);
    }

    #[test]
    fn test_decrement_stock_to_zero() {
        let inv = inventory();
        assert_eq!(inv.decrement_stock("pixel fold", 5).unwrap(), 0);
        assert!(matches!(
            inv.decrement_stock("Pixel Fold", 1),
            Err(InventoryError::InsufficientStock { available: 0, .. })
        ));
    }

    #[test]
    fn test_decrement_stock_insufficient_is_noop() {
        let inv = inventory();
        let err = inv.decrement_stock("Pixel Watch 1", 5).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                item: "Pixel Watch 1".to_string(),
                requested: 5,
                available: 4,
            }
        );
        assert_eq!(inv.find_item("Pixel Watch 1").unwrap().unwrap().quantity, 4);
    }

    #[test]
    fn test_poisoned_lock_is_an_error() {
        let inv = inventory();
        inv.poison();
        assert_eq!(inv.find_item("Pixel 8"), Err(InventoryError::LockPoisoned));
        assert_eq!(
            inv.decrement_stock("Pixel 8", 1),
            Err(InventoryError::LockPoisoned)
        );
    }

    #[test]
    fn test_decrement_stock_unknown_item() {
        let inv = inventory();
        assert_eq!(
            inv.decrement_stock("Nexus 5", 1).unwrap_err(),
            InventoryError::ItemNotFound("Nexus 5".to_string())
        );
    }
}
