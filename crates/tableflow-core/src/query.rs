//! # Queries
//!
//! Read-only projections over a [`RestaurantState`] snapshot, one per view:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Host board      ──► tables, table_counts, remaining_almost_free       │
//! │  Kitchen display ──► kitchen_queue(filter), item_counts                │
//! │  Cleaning queue  ──► cleaning_queue                                    │
//! │  Timer monitor   ──► expired_tables                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{ItemStatus, Order, OrderItem, RestaurantState, Table, TableStatus};

/// Narrows the kitchen queue to one station and/or one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitchenFilter {
    pub category: Option<String>,
    pub table_id: Option<String>,
}

impl KitchenFilter {
    pub fn station(category: impl Into<String>) -> Self {
        KitchenFilter {
            category: Some(category.into()),
            table_id: None,
        }
    }

    pub fn table(table_id: impl Into<String>) -> Self {
        KitchenFilter {
            category: None,
            table_id: Some(table_id.into()),
        }
    }

    fn matches(&self, item: &OrderItem) -> bool {
        self.category.as_deref().map_or(true, |c| item.category == c)
            && self.table_id.as_deref().map_or(true, |t| item.table_id == t)
    }
}

/// Item counts for the kitchen header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatusCounts {
    pub pending: usize,
    pub cooking: usize,
    pub ready: usize,
    pub served: usize,
}

impl ItemStatusCounts {
    pub fn get(&self, status: ItemStatus) -> usize {
        match status {
            ItemStatus::Pending => self.pending,
            ItemStatus::Cooking => self.cooking,
            ItemStatus::Ready => self.ready,
            ItemStatus::Served => self.served,
        }
    }
}

/// Table counts for the host legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableStatusCounts {
    pub free: usize,
    pub occupied: usize,
    pub cooking: usize,
    pub eating: usize,
    pub almost_free: usize,
    pub cleaning: usize,
}

impl TableStatusCounts {
    pub fn get(&self, status: TableStatus) -> usize {
        match status {
            TableStatus::Free => self.free,
            TableStatus::Occupied => self.occupied,
            TableStatus::Cooking => self.cooking,
            TableStatus::Eating => self.eating,
            TableStatus::AlmostFree => self.almost_free,
            TableStatus::Cleaning => self.cleaning,
        }
    }
}

impl RestaurantState {
    pub fn table_by_number(&self, number: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.number == number)
    }

    /// The open order of a table, if any.
    pub fn order_for_table(&self, table_id: &str) -> Option<&Order> {
        let order_id = self.table(table_id)?.order_id.as_deref()?;
        self.order(order_id)
    }

    /// Items of an order in placement order.
    pub fn items_for_order(&self, order_id: &str) -> Vec<&OrderItem> {
        self.order_items
            .iter()
            .filter(|i| i.order_id == order_id)
            .collect()
    }

    /// Items the kitchen still has to deal with (everything not SERVED).
    pub fn kitchen_queue(&self, filter: &KitchenFilter) -> Vec<&OrderItem> {
        self.order_items
            .iter()
            .filter(|i| i.status != ItemStatus::Served && filter.matches(i))
            .collect()
    }

    pub fn item_counts(&self) -> ItemStatusCounts {
        let mut counts = ItemStatusCounts::default();
        for item in &self.order_items {
            match item.status {
                ItemStatus::Pending => counts.pending += 1,
                ItemStatus::Cooking => counts.cooking += 1,
                ItemStatus::Ready => counts.ready += 1,
                ItemStatus::Served => counts.served += 1,
            }
        }
        counts
    }

    pub fn table_counts(&self) -> TableStatusCounts {
        let mut counts = TableStatusCounts::default();
        for table in &self.tables {
            match table.status {
                TableStatus::Free => counts.free += 1,
                TableStatus::Occupied => counts.occupied += 1,
                TableStatus::Cooking => counts.cooking += 1,
                TableStatus::Eating => counts.eating += 1,
                TableStatus::AlmostFree => counts.almost_free += 1,
                TableStatus::Cleaning => counts.cleaning += 1,
            }
        }
        counts
    }

    /// Tables waiting for the cleaning staff.
    pub fn cleaning_queue(&self) -> Vec<&Table> {
        self.tables
            .iter()
            .filter(|t| t.status == TableStatus::Cleaning)
            .collect()
    }

    /// Time left on a table's ALMOST_FREE countdown, floored at zero.
    ///
    /// `None` when the table is unknown or not counting down. Reports zero
    /// as soon as the deadline passes, whether or not CHECK_TIMER has run.
    pub fn remaining_almost_free(&self, table_id: &str, now: DateTime<Utc>) -> Option<Duration> {
        let table = self.table(table_id)?;
        if table.status != TableStatus::AlmostFree {
            return None;
        }
        let end = table.almost_free_end_time?;
        Some((end - now).max(Duration::zero()))
    }

    /// Ids of ALMOST_FREE tables whose countdown has ended at `now`.
    pub fn expired_tables(&self, now: DateTime<Utc>) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| {
                t.status == TableStatus::AlmostFree
                    && t.almost_free_end_time.is_some_and(|end| end <= now)
            })
            .map(|t| t.id.as_str())
            .collect()
    }

    /// Human-readable descriptions of every broken table/order invariant.
    ///
    /// Empty for every state the engine can produce.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for table in &self.tables {
            if table.status.is_seated() {
                match table.order_id.as_deref() {
                    None => violations.push(format!("{} is {} without an order", table.id, table.status)),
                    Some(order_id) if self.order(order_id).is_none() => violations.push(format!(
                        "{} references missing order {}",
                        table.id, order_id
                    )),
                    Some(_) => {}
                }
            }
            if table.status == TableStatus::Free && table.order_id.is_some() {
                violations.push(format!("{} is FREE but holds an order", table.id));
            }
            let counting_down = table.status == TableStatus::AlmostFree;
            if counting_down != table.almost_free_end_time.is_some() {
                violations.push(format!(
                    "{} is {} with almost_free_end_time {:?}",
                    table.id, table.status, table.almost_free_end_time
                ));
            }
        }

        for order in &self.orders {
            for item_id in &order.item_ids {
                if self.order_item(item_id).is_none() {
                    violations.push(format!("order {} lists missing item {}", order.id, item_id));
                }
            }
        }
        for item in &self.order_items {
            if self.order(&item.order_id).is_none() {
                violations.push(format!("item {} belongs to missing order {}", item.id, item.order_id));
            }
        }

        violations
    }
}

/// Renders a countdown as `MM:SS`, flooring partial seconds.
///
/// ```rust
/// use chrono::Duration;
/// use tableflow_core::query::format_countdown;
///
/// assert_eq!(format_countdown(Duration::milliseconds(119_900)), "01:59");
/// ```
pub fn format_countdown(remaining: Duration) -> String {
    let total_seconds = remaining.num_seconds().max(0);
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
