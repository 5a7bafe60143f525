//! Order line status.
//!
//! Each cart entry becomes one order line when an order is placed:
//!
//! ```text
//! pending ──▶ fulfilled   (stock decremented)
//!    │
//!    └──────▶ failed      (unknown item or insufficient stock)
//! ```
//!
//! Both outcomes are terminal. There is no compensation or retry.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::CartEntry;

/// Outcome of one order line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum OrderLineStatus {
    #[default]
    Pending,
    Fulfilled,
    Failed {
        /// Human-readable cause.
        reason: String,
    },
}

impl OrderLineStatus {
    /// Whether the line has reached a final state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A cart entry being turned into an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub entry: CartEntry,
    pub status: OrderLineStatus,
}

impl OrderLine {
    /// Start a pending line for `entry`.
    #[must_use]
    pub fn pending(entry: CartEntry) -> Self {
        Self {
            entry,
            status: OrderLineStatus::Pending,
        }
    }

    /// Mark the line as fulfilled.
    ///
    /// Terminal lines are left unchanged.
    #[must_use]
    pub fn fulfill(mut self) -> Self {
        if !self.status.is_terminal() {
            self.status = OrderLineStatus::Fulfilled;
        }
        self
    }

    /// Mark the line as failed with `reason`.
    ///
    /// Terminal lines are left unchanged.
    #[must_use]
    pub fn fail(mut self, reason: impl Into<String>) -> Self {
        if !self.status.is_terminal() {
            self.status = OrderLineStatus::Failed {
                reason: reason.into(),
            };
        }
        self
    }
}

impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let CartEntry { item, quantity } = &self.entry;
        match &self.status {
            OrderLineStatus::Pending => write!(f, "Order for {quantity} x {item} is pending."),
            OrderLineStatus::Fulfilled => {
                write!(f, "Order placed for {quantity} x {item}.")
            }
            OrderLineStatus::Failed { reason } => {
                write!(f, "Could not order {quantity} x {item}: {reason}.")
            }
        }
    }
}
