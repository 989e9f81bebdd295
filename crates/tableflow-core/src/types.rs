//! # Domain Types
//!
//! Entities held by the restaurant state engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Table       │   │     Order       │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  table_id       │◄──│  order_id       │       │
//! │  │  number         │   │  item_ids       │──►│  id             │       │
//! │  │  status         │   │  created_at     │   │  status         │       │
//! │  │  order_id       │──►│  id             │   │  menu snapshot  │       │
//! │  │  almost_free_.. │   │  total_amount   │   │  table_id       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  TableStatus    │   │   ItemStatus    │                             │
//! │  │  FREE           │   │   PENDING       │                             │
//! │  │  OCCUPIED       │   │   COOKING       │                             │
//! │  │  COOKING        │   │   READY         │                             │
//! │  │  EATING         │   │   SERVED        │                             │
//! │  │  ALMOST_FREE    │   └─────────────────┘                             │
//! │  │  CLEANING       │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An [`OrderItem`] copies the menu item's name, category and prep time at
//! placement. The catalog can change afterwards without touching open orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Table Status
// =============================================================================

/// Where a table is in its lifecycle.
///
/// ```text
/// FREE ─► OCCUPIED ─► COOKING ─► EATING ─► ALMOST_FREE ─► CLEANING ─► FREE
///                                    │                        ▲
///                                    └──── customer left ─────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    /// Available for new guests.
    #[default]
    Free,
    /// Order placed, nothing cooking yet.
    Occupied,
    /// At least one item is being prepared.
    Cooking,
    /// At least one item has been served.
    Eating,
    /// Everything served, countdown to cleaning running.
    AlmostFree,
    /// Guests gone, table needs cleaning.
    Cleaning,
}

impl TableStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TableStatus; 6] = [
        TableStatus::Free,
        TableStatus::Occupied,
        TableStatus::Cooking,
        TableStatus::Eating,
        TableStatus::AlmostFree,
        TableStatus::Cleaning,
    ];

    /// Guests are seated and an order is open.
    pub const fn is_seated(&self) -> bool {
        matches!(
            self,
            TableStatus::Occupied
                | TableStatus::Cooking
                | TableStatus::Eating
                | TableStatus::AlmostFree
        )
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Free => "FREE",
            TableStatus::Occupied => "OCCUPIED",
            TableStatus::Cooking => "COOKING",
            TableStatus::Eating => "EATING",
            TableStatus::AlmostFree => "ALMOST_FREE",
            TableStatus::Cleaning => "CLEANING",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Item Status
// =============================================================================

/// Kitchen progress of a single order item. Only ever moves forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Pending,
    Cooking,
    Ready,
    Served,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Pending,
        ItemStatus::Cooking,
        ItemStatus::Ready,
        ItemStatus::Served,
    ];

    /// True when moving to `next` would go backwards.
    ///
    /// Declaration order is lifecycle order, so the derived `Ord` is the rank.
    #[inline]
    pub fn regresses_to(&self, next: ItemStatus) -> bool {
        next < *self
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "PENDING",
            ItemStatus::Cooking => "COOKING",
            ItemStatus::Ready => "READY",
            ItemStatus::Served => "SERVED",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// An entry in the external menu catalog. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Kitchen station, e.g. "South Indian".
    pub category: String,
    /// Preparation time in minutes.
    pub prep_time: u32,
    pub price: Money,
}

// =============================================================================
// Table
// =============================================================================

/// A physical table on the floor.
///
/// Only `status`, `order_id` and `almost_free_end_time` ever change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Stable identifier, `table-<number>`.
    pub id: String,
    /// Human-facing number, 1..=N.
    pub number: u32,
    pub status: TableStatus,
    /// The open order. Kept through CLEANING so cleanup can find it.
    pub order_id: Option<String>,
    /// When the ALMOST_FREE countdown ends. Present only while ALMOST_FREE.
    #[ts(as = "Option<String>")]
    pub almost_free_end_time: Option<DateTime<Utc>>,
}

impl Table {
    /// A free table with the conventional id for `number`.
    pub fn free(number: u32) -> Self {
        Table {
            id: format!("table-{}", number),
            number,
            status: TableStatus::Free,
            order_id: None,
            almost_free_end_time: None,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A single prepaid placement against one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub table_id: String,
    /// Items in placement order.
    pub item_ids: Vec<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Fixed at placement.
    pub total_amount: Money,
}

// =============================================================================
// Order Item
// =============================================================================

/// One unit of a menu item within an order.
///
/// Ordering three of the same dish yields three of these, each with its
/// own status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub menu_item_id: String,
    /// Name at time of order (frozen).
    pub menu_item_name: String,
    /// Station at time of order (frozen).
    pub category: String,
    pub table_id: String,
    pub order_id: String,
    pub status: ItemStatus,
    /// Minutes, copied from the menu.
    pub prep_time: u32,
}

// =============================================================================
// Restaurant State
// =============================================================================

/// Everything the engine knows: one immutable snapshot.
///
/// Events never edit a snapshot in place; the engine builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantState {
    pub tables: Vec<Table>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
}

impl RestaurantState {
    /// Opening state: `count` free tables numbered from 1, no orders.
    pub fn with_tables(count: u32) -> Self {
        RestaurantState {
            tables: (1..=count).map(Table::free).collect(),
            orders: Vec::new(),
            order_items: Vec::new(),
        }
    }

    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub fn order_item(&self, item_id: &str) -> Option<&OrderItem> {
        self.order_items.iter().find(|i| i.id == item_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
