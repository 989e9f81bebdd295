//! # Floor Observer
//!
//! Hook notified after every dispatch that changed state or was rejected.
//! Views and audit sinks plug in here; the store itself only logs.

use tableflow_core::{RejectReason, RestaurantEvent, RestaurantState};
use tracing::{info, warn};

/// Receives dispatch outcomes from the [`FloorStore`](crate::FloorStore).
///
/// Called after the write lock is released, so implementations may read
/// the store but must not block.
pub trait FloorObserver: Send + Sync {
    /// `state` is the snapshot the event produced.
    fn on_applied(&self, event: &RestaurantEvent, state: &RestaurantState);

    fn on_rejected(&self, event: &RestaurantEvent, reason: &RejectReason);
}

/// No-op observer for testing.
pub struct NoOpObserver;

impl FloorObserver for NoOpObserver {
    fn on_applied(&self, _event: &RestaurantEvent, _state: &RestaurantState) {}
    fn on_rejected(&self, _event: &RestaurantEvent, _reason: &RejectReason) {}
}

/// Logs every outcome with the floor summary.
pub struct TracingObserver;

impl FloorObserver for TracingObserver {
    fn on_applied(&self, event: &RestaurantEvent, state: &RestaurantState) {
        let tables = state.table_counts();
        let items = state.item_counts();
        info!(
            event = event.kind(),
            free = tables.free,
            seated = tables.occupied + tables.cooking + tables.eating,
            almost_free = tables.almost_free,
            cleaning = tables.cleaning,
            kitchen_pending = items.pending,
            kitchen_cooking = items.cooking,
            "Floor updated"
        );
    }

    fn on_rejected(&self, event: &RestaurantEvent, reason: &RejectReason) {
        warn!(event = event.kind(), %reason, "Event rejected");
    }
}
