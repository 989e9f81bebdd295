//! # Derived Table Status
//!
//! A table's status is not set directly by the kitchen. It is derived from
//! its items at the two moments an item event can change it:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  START_COOKING ──► status_after_cooking(table)                         │
//! │                      OCCUPIED | COOKING ──► COOKING                    │
//! │                      anything else      ──► unchanged                  │
//! │                                                                         │
//! │  MARK_SERVED   ──► status_after_serving(table, order's items)          │
//! │                      all SERVED          ──► ALMOST_FREE (timer starts)│
//! │                      some SERVED, !EATING ──► EATING                   │
//! │                      otherwise           ──► unchanged                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{ItemStatus, TableStatus};

/// Table status after one of its items starts cooking.
///
/// Never downgrades a table that is already eating, counting down or
/// being cleaned.
pub fn status_after_cooking(current: TableStatus) -> TableStatus {
    match current {
        TableStatus::Occupied | TableStatus::Cooking => TableStatus::Cooking,
        other => other,
    }
}

/// Outcome of [`status_after_serving`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeDerivation {
    Unchanged,
    /// First item reached the table.
    Eating,
    /// Last item reached the table: start the countdown.
    AlmostFree,
}

/// Table status change after an item of its order is served.
///
/// `order_items` are the statuses of every item in the order, already
/// including the item that was just served.
pub fn status_after_serving<I>(current: TableStatus, order_items: I) -> ServeDerivation
where
    I: IntoIterator<Item = ItemStatus>,
{
    let mut any_served = false;
    let mut all_served = true;
    for status in order_items {
        if status == ItemStatus::Served {
            any_served = true;
        } else {
            all_served = false;
        }
    }

    if any_served && all_served {
        ServeDerivation::AlmostFree
    } else if any_served && current != TableStatus::Eating {
        ServeDerivation::Eating
    } else {
        ServeDerivation::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ItemStatus::*;

    #[test]
    fn test_cooking_promotes_only_early_tables() {
        assert_eq!(status_after_cooking(TableStatus::Occupied), TableStatus::Cooking);
        assert_eq!(status_after_cooking(TableStatus::Cooking), TableStatus::Cooking);
        assert_eq!(status_after_cooking(TableStatus::Eating), TableStatus::Eating);
        assert_eq!(
            status_after_cooking(TableStatus::AlmostFree),
            TableStatus::AlmostFree
        );
        assert_eq!(status_after_cooking(TableStatus::Cleaning), TableStatus::Cleaning);
    }

    #[test]
    fn test_first_served_means_eating() {
        assert_eq!(
            status_after_serving(TableStatus::Cooking, [Served, Cooking, Pending]),
            ServeDerivation::Eating
        );
    }

    #[test]
    fn test_second_served_stays_eating() {
        assert_eq!(
            status_after_serving(TableStatus::Eating, [Served, Served, Ready]),
            ServeDerivation::Unchanged
        );
    }

    #[test]
    fn test_last_served_means_almost_free() {
        assert_eq!(
            status_after_serving(TableStatus::Eating, [Served, Served, Served]),
            ServeDerivation::AlmostFree
        );
        // A single-item order goes straight from cooking to the countdown.
        assert_eq!(
            status_after_serving(TableStatus::Cooking, [Served]),
            ServeDerivation::AlmostFree
        );
    }

    #[test]
    fn test_nothing_served_is_unchanged() {
        assert_eq!(
            status_after_serving(TableStatus::Cooking, [Ready, Cooking]),
            ServeDerivation::Unchanged
        );
        assert_eq!(
            status_after_serving(TableStatus::Occupied, std::iter::empty()),
            ServeDerivation::Unchanged
        );
    }
}
