//! # Events
//!
//! The closed set of things that can happen on the floor. Dispatching one of
//! these is the only way to change [`RestaurantState`](crate::RestaurantState).
//!
//! ## Who Dispatches What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Guest (after payment) ──► PLACE_ORDER                                 │
//! │  Kitchen station       ──► START_COOKING, MARK_READY, MARK_SERVED      │
//! │  Host                  ──► CUSTOMER_LEFT                               │
//! │  Cleaning staff        ──► MARK_CLEANED                                │
//! │  Timer monitor         ──► CHECK_TIMER                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! ```json
//! { "type": "MARK_SERVED", "payload": { "orderItemId": "item-3f2a..." } }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::menu::CartLine;
use crate::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub table_id: String,
    pub items: Vec<CartLine>,
    pub total_amount: Money,
}

/// Payload of the three kitchen events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub order_item_id: String,
}

/// Payload of the three table events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableRef {
    pub table_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum RestaurantEvent {
    PlaceOrder(PlaceOrder),
    StartCooking(ItemRef),
    MarkReady(ItemRef),
    MarkServed(ItemRef),
    CustomerLeft(TableRef),
    MarkCleaned(TableRef),
    CheckTimer(TableRef),
}

impl RestaurantEvent {
    /// Wire names of every known event kind.
    pub const KINDS: [&'static str; 7] = [
        "PLACE_ORDER",
        "START_COOKING",
        "MARK_READY",
        "MARK_SERVED",
        "CUSTOMER_LEFT",
        "MARK_CLEANED",
        "CHECK_TIMER",
    ];

    pub fn place_order(
        table_id: impl Into<String>,
        items: Vec<CartLine>,
        total_amount: Money,
    ) -> Self {
        RestaurantEvent::PlaceOrder(PlaceOrder {
            table_id: table_id.into(),
            items,
            total_amount,
        })
    }

    pub fn start_cooking(order_item_id: impl Into<String>) -> Self {
        RestaurantEvent::StartCooking(ItemRef {
            order_item_id: order_item_id.into(),
        })
    }

    pub fn mark_ready(order_item_id: impl Into<String>) -> Self {
        RestaurantEvent::MarkReady(ItemRef {
            order_item_id: order_item_id.into(),
        })
    }

    pub fn mark_served(order_item_id: impl Into<String>) -> Self {
        RestaurantEvent::MarkServed(ItemRef {
            order_item_id: order_item_id.into(),
        })
    }

    pub fn customer_left(table_id: impl Into<String>) -> Self {
        RestaurantEvent::CustomerLeft(TableRef {
            table_id: table_id.into(),
        })
    }

    pub fn mark_cleaned(table_id: impl Into<String>) -> Self {
        RestaurantEvent::MarkCleaned(TableRef {
            table_id: table_id.into(),
        })
    }

    pub fn check_timer(table_id: impl Into<String>) -> Self {
        RestaurantEvent::CheckTimer(TableRef {
            table_id: table_id.into(),
        })
    }

    /// Wire name of this event.
    pub fn kind(&self) -> &'static str {
        match self {
            RestaurantEvent::PlaceOrder(_) => "PLACE_ORDER",
            RestaurantEvent::StartCooking(_) => "START_COOKING",
            RestaurantEvent::MarkReady(_) => "MARK_READY",
            RestaurantEvent::MarkServed(_) => "MARK_SERVED",
            RestaurantEvent::CustomerLeft(_) => "CUSTOMER_LEFT",
            RestaurantEvent::MarkCleaned(_) => "MARK_CLEANED",
            RestaurantEvent::CheckTimer(_) => "CHECK_TIMER",
        }
    }
}
