//! # Transition Engine
//!
//! The pure function at the center of the system:
//! `(state, event, now) → Transition`.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    TransitionEngine::apply                              │
//! │                                                                         │
//! │   &RestaurantState ─┐                                                   │
//! │   &RestaurantEvent ─┼──► lookup ──► precheck ──► clone + edit ──┐      │
//! │   now ──────────────┘       │           │                       │      │
//! │                             ▼           ▼                       ▼      │
//! │                        Rejected     Unchanged               Applied    │
//! │                     (RejectReason)  (no-op)            (new snapshot)  │
//! │                                                                         │
//! │   The input snapshot is never modified.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rejections
//! Unknown ids, orders onto busy tables, empty orders, events for orders
//! that have already closed and backward item moves are all rejected with a
//! [`RejectReason`] and leave state as it was.
//!
//! ## Time
//! The engine never reads a clock. `now` stamps new orders, starts the
//! ALMOST_FREE countdown and decides whether CHECK_TIMER has expired.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::derive::{status_after_cooking, status_after_serving, ServeDerivation};
use crate::error::{CoreResult, RejectReason, ValidationError};
use crate::event::{PlaceOrder, RestaurantEvent};
use crate::menu::CartLine;
use crate::types::{ItemStatus, Order, OrderItem, RestaurantState, TableStatus};
use crate::validation::{validate_cart_line_count, validate_quantity, ValidationResult};
use crate::{DEFAULT_ALMOST_FREE_SECS, MAX_CART_LINES, MAX_ITEM_QUANTITY};

// =============================================================================
// Configuration
// =============================================================================

/// Tunables for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long a fully served table counts down before it needs cleaning.
    pub almost_free_duration: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            almost_free_duration: Duration::seconds(DEFAULT_ALMOST_FREE_SECS as i64),
        }
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A full replacement snapshot.
    Applied(RestaurantState),
    /// The event was valid but changed nothing.
    Unchanged,
    Rejected(RejectReason),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }

    /// The new snapshot, if one was produced.
    pub fn into_state(self) -> Option<RestaurantState> {
        match self {
            Transition::Applied(state) => Some(state),
            _ => None,
        }
    }

    /// `Ok(Some(state))`, `Ok(None)` for a no-op, `Err` for a rejection.
    pub fn into_result(self) -> CoreResult<Option<RestaurantState>> {
        match self {
            Transition::Applied(state) => Ok(Some(state)),
            Transition::Unchanged => Ok(None),
            Transition::Rejected(reason) => Err(reason.into()),
        }
    }
}

/// Internal step result: `Ok(None)` is a no-op.
type Step = Result<Option<RestaurantState>, RejectReason>;

// =============================================================================
// Engine
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    config: EngineConfig,
}

impl TransitionEngine {
    pub fn new(config: EngineConfig) -> Self {
        TransitionEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Applies `event` to `state` as of `now`.
    pub fn apply(
        &self,
        state: &RestaurantState,
        event: &RestaurantEvent,
        now: DateTime<Utc>,
    ) -> Transition {
        let step = match event {
            RestaurantEvent::PlaceOrder(cmd) => self.place_order(state, cmd, now),
            RestaurantEvent::StartCooking(item) => self.start_cooking(state, &item.order_item_id),
            RestaurantEvent::MarkReady(item) => self.mark_ready(state, &item.order_item_id),
            RestaurantEvent::MarkServed(item) => {
                self.mark_served(state, &item.order_item_id, now)
            }
            RestaurantEvent::CustomerLeft(table) => self.customer_left(state, &table.table_id),
            RestaurantEvent::MarkCleaned(table) => self.mark_cleaned(state, &table.table_id),
            RestaurantEvent::CheckTimer(table) => self.check_timer(state, &table.table_id, now),
        };

        match step {
            Ok(Some(next)) => Transition::Applied(next),
            Ok(None) => Transition::Unchanged,
            Err(reason) => Transition::Rejected(reason),
        }
    }

    // =========================================================================
    // Guest
    // =========================================================================

    fn place_order(&self, state: &RestaurantState, cmd: &PlaceOrder, now: DateTime<Utc>) -> Step {
        let table_idx = table_index(state, &cmd.table_id)?;
        let table = &state.tables[table_idx];

        if table.status != TableStatus::Free {
            return Err(RejectReason::TableNotFree {
                table_id: table.id.clone(),
                status: table.status,
            });
        }

        if cmd.items.is_empty() {
            return Err(RejectReason::EmptyOrder(table.id.clone()));
        }
        let units = order_units(&cmd.items).map_err(|reason| RejectReason::InvalidOrder {
            table_id: table.id.clone(),
            reason,
        })?;

        let order_id = new_id("ORD");
        let mut items = Vec::with_capacity(units as usize);
        for line in &cmd.items {
            for _ in 0..line.quantity {
                items.push(OrderItem {
                    id: new_id("item"),
                    menu_item_id: line.menu_item.id.clone(),
                    menu_item_name: line.menu_item.name.clone(),
                    category: line.menu_item.category.clone(),
                    table_id: table.id.clone(),
                    order_id: order_id.clone(),
                    status: ItemStatus::Pending,
                    prep_time: line.menu_item.prep_time,
                });
            }
        }

        let order = Order {
            id: order_id.clone(),
            table_id: table.id.clone(),
            item_ids: items.iter().map(|i| i.id.clone()).collect(),
            created_at: now,
            total_amount: cmd.total_amount,
        };

        let mut next = state.clone();
        let table = &mut next.tables[table_idx];
        table.status = TableStatus::Occupied;
        table.order_id = Some(order_id);
        table.almost_free_end_time = None;
        next.orders.push(order);
        next.order_items.extend(items);
        Ok(Some(next))
    }

    // =========================================================================
    // Kitchen
    // =========================================================================

    fn start_cooking(&self, state: &RestaurantState, item_id: &str) -> Step {
        let Some((mut next, table_idx)) = advance_item(state, item_id, ItemStatus::Cooking)? else {
            return Ok(None);
        };
        let table = &mut next.tables[table_idx];
        table.status = status_after_cooking(table.status);
        Ok(Some(next))
    }

    fn mark_ready(&self, state: &RestaurantState, item_id: &str) -> Step {
        Ok(advance_item(state, item_id, ItemStatus::Ready)?.map(|(next, _)| next))
    }

    fn mark_served(&self, state: &RestaurantState, item_id: &str, now: DateTime<Utc>) -> Step {
        let Some((mut next, table_idx)) = advance_item(state, item_id, ItemStatus::Served)? else {
            return Ok(None);
        };

        let order_id = &state.order_items[item_index(state, item_id)?].order_id;
        let derivation = status_after_serving(
            next.tables[table_idx].status,
            next.order_items
                .iter()
                .filter(|i| &i.order_id == order_id)
                .map(|i| i.status),
        );

        let table = &mut next.tables[table_idx];
        match derivation {
            ServeDerivation::AlmostFree => {
                table.status = TableStatus::AlmostFree;
                table.almost_free_end_time = Some(now + self.config.almost_free_duration);
            }
            ServeDerivation::Eating => table.status = TableStatus::Eating,
            ServeDerivation::Unchanged => {}
        }
        Ok(Some(next))
    }

    // =========================================================================
    // Host, cleaning staff, timer
    // =========================================================================

    fn customer_left(&self, state: &RestaurantState, table_id: &str) -> Step {
        let table_idx = table_index(state, table_id)?;
        Ok(send_to_cleaning(state, table_idx))
    }

    fn mark_cleaned(&self, state: &RestaurantState, table_id: &str) -> Step {
        let table_idx = table_index(state, table_id)?;
        let table = &state.tables[table_idx];

        if table.status == TableStatus::Free
            && table.order_id.is_none()
            && table.almost_free_end_time.is_none()
        {
            return Ok(None);
        }

        let mut next = state.clone();
        if let Some(order_id) = &table.order_id {
            next.order_items.retain(|i| &i.order_id != order_id);
            next.orders.retain(|o| &o.id != order_id);
        }

        let table = &mut next.tables[table_idx];
        table.status = TableStatus::Free;
        table.order_id = None;
        table.almost_free_end_time = None;
        Ok(Some(next))
    }

    fn check_timer(&self, state: &RestaurantState, table_id: &str, now: DateTime<Utc>) -> Step {
        let table_idx = table_index(state, table_id)?;
        let table = &state.tables[table_idx];

        let expired = table.status == TableStatus::AlmostFree
            && table.almost_free_end_time.is_some_and(|end| end <= now);
        if !expired {
            return Ok(None);
        }
        Ok(send_to_cleaning(state, table_idx))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Total units across `lines`, each line held to the cart limits.
fn order_units(lines: &[CartLine]) -> ValidationResult<u32> {
    validate_cart_line_count(lines.len())?;
    lines.iter().try_fold(0u32, |units, line| {
        validate_quantity(line.quantity)?;
        units
            .checked_add(line.quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "order units".to_string(),
                min: 1,
                max: MAX_CART_LINES as i64 * MAX_ITEM_QUANTITY as i64,
            })
    })
}

fn table_index(state: &RestaurantState, table_id: &str) -> Result<usize, RejectReason> {
    state
        .tables
        .iter()
        .position(|t| t.id == table_id)
        .ok_or_else(|| RejectReason::TableNotFound(table_id.to_string()))
}

fn item_index(state: &RestaurantState, item_id: &str) -> Result<usize, RejectReason> {
    state
        .order_items
        .iter()
        .position(|i| i.id == item_id)
        .ok_or_else(|| RejectReason::OrderItemNotFound(item_id.to_string()))
}

/// Moves one item forward to `target`.
///
/// Returns the edited copy and the index of the item's table, or `None`
/// when the item is already at `target`.
fn advance_item(
    state: &RestaurantState,
    item_id: &str,
    target: ItemStatus,
) -> Result<Option<(RestaurantState, usize)>, RejectReason> {
    let idx = item_index(state, item_id)?;
    let item = &state.order_items[idx];
    let table_idx = table_index(state, &item.table_id)?;
    let table = &state.tables[table_idx];

    if table.status == TableStatus::Cleaning
        || table.order_id.as_deref() != Some(item.order_id.as_str())
    {
        return Err(RejectReason::OrderAlreadyClosed(item.order_id.clone()));
    }
    if item.status == target {
        return Ok(None);
    }
    if item.status.regresses_to(target) {
        return Err(RejectReason::ItemStatusRegression {
            item_id: item.id.clone(),
            from: item.status,
            to: target,
        });
    }

    let mut next = state.clone();
    next.order_items[idx].status = target;
    Ok(Some((next, table_idx)))
}

/// CLEANING with the countdown cleared; the order link stays for cleanup.
fn send_to_cleaning(state: &RestaurantState, table_idx: usize) -> Option<RestaurantState> {
    let table = &state.tables[table_idx];
    if table.status == TableStatus::Cleaning && table.almost_free_end_time.is_none() {
        return None;
    }

    let mut next = state.clone();
    let table = &mut next.tables[table_idx];
    table.status = TableStatus::Cleaning;
    table.almost_free_end_time = None;
    Some(next)
}

// =============================================================================
// Unit Tests
// =============================================================================
