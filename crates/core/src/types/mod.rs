//! Core types for the Pixel Store.
//!
//! This module provides type-safe wrappers for the store's domain concepts.

pub mod cart;
pub mod item;
pub mod price;
pub mod session;
pub mod status;

pub use cart::CartEntry;
pub use item::{Category, Item, normalize_name};
pub use price::{Price, PriceError};
pub use session::SessionId;
pub use status::{OrderLine, OrderLineStatus};
