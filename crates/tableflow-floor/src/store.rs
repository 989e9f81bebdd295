//! # Floor Store
//!
//! The single owner of restaurant state.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FloorStore::dispatch                             │
//! │                                                                         │
//! │   event ──► write lock ──► engine.apply(snapshot, event, clock.now())  │
//! │                                   │                                     │
//! │            ┌──────────────────────┼────────────────────┐                │
//! │            ▼                      ▼                    ▼                │
//! │        Applied               Unchanged             Rejected             │
//! │    swap in new Arc         keep old Arc       Err(FloorError::Rejected) │
//! │            │                                           │                │
//! │            └────────── unlock, notify observer ────────┘                │
//! │                                                                         │
//! │   Readers: snapshot() clones the current Arc and never blocks writers  │
//! │   for longer than that clone.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clone the store to share it; every clone talks to the same state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use tableflow_core::{
    decode_event, RestaurantEvent, RestaurantState, Transition, TransitionEngine,
};

use crate::clock::{Clock, SystemClock};
use crate::config::FloorConfig;
use crate::error::{FloorError, FloorResult};
use crate::observer::{FloorObserver, TracingObserver};

/// Successful dispatch outcome.
#[derive(Debug, Clone)]
pub enum Dispatched {
    /// The event produced this new snapshot.
    Applied(Arc<RestaurantState>),
    /// The event was a no-op; this is the unchanged snapshot.
    Unchanged(Arc<RestaurantState>),
}

impl Dispatched {
    pub fn is_applied(&self) -> bool {
        matches!(self, Dispatched::Applied(_))
    }

    /// The current snapshot either way.
    pub fn state(&self) -> &Arc<RestaurantState> {
        match self {
            Dispatched::Applied(state) | Dispatched::Unchanged(state) => state,
        }
    }
}

/// Shared handle to the restaurant state.
#[derive(Clone)]
pub struct FloorStore {
    state: Arc<RwLock<Arc<RestaurantState>>>,
    engine: TransitionEngine,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn FloorObserver>,
}

impl FloorStore {
    /// Creates a store on the system clock that logs every outcome.
    pub fn new(engine: TransitionEngine, initial: RestaurantState) -> Self {
        FloorStore {
            state: Arc::new(RwLock::new(Arc::new(initial))),
            engine,
            clock: Arc::new(SystemClock),
            observer: Arc::new(TracingObserver),
        }
    }

    /// A store with the configured floor size and countdown.
    pub fn from_config(config: &FloorConfig) -> Self {
        Self::new(
            TransitionEngine::new(config.engine_config()),
            config.initial_state(),
        )
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn FloorObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<RestaurantState> {
        self.state.read().await.clone()
    }

    /// Applies one event as a single atomic step.
    ///
    /// Rejections leave state untouched and come back as
    /// [`FloorError::Rejected`].
    pub async fn dispatch(&self, event: RestaurantEvent) -> FloorResult<Dispatched> {
        let mut guard = self.state.write().await;
        let now = self.clock.now();

        match self.engine.apply(&guard, &event, now) {
            Transition::Applied(next) => {
                debug_assert!(
                    next.invariant_violations().is_empty(),
                    "{} broke invariants: {:?}",
                    event.kind(),
                    next.invariant_violations()
                );
                let next = Arc::new(next);
                *guard = next.clone();
                drop(guard);

                self.observer.on_applied(&event, &next);
                Ok(Dispatched::Applied(next))
            }
            Transition::Unchanged => {
                let current = guard.clone();
                drop(guard);

                debug!(event = event.kind(), "Event changed nothing");
                Ok(Dispatched::Unchanged(current))
            }
            Transition::Rejected(reason) => {
                drop(guard);

                self.observer.on_rejected(&event, &reason);
                Err(FloorError::Rejected(reason))
            }
        }
    }

    /// Decodes and dispatches an event envelope.
    ///
    /// Unknown event kinds are ignored and report the current snapshot as
    /// unchanged.
    pub async fn dispatch_json(&self, json: &str) -> FloorResult<Dispatched> {
        match decode_event(json)? {
            Some(event) => self.dispatch(event).await,
            None => {
                debug!("Ignoring event of unknown kind");
                Ok(Dispatched::Unchanged(self.snapshot().await))
            }
        }
    }

    /// Replaces the whole state. Used when restoring a floor.
    pub async fn reset(&self, state: RestaurantState) {
        *self.state.write().await = Arc::new(state);
        debug!("Floor state reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, TimeZone};
    use std::sync::Mutex;
    use tableflow_core::{Cart, MenuCatalog, RejectReason, TableStatus};

    #[derive(Default)]
    struct Recorder {
        applied: Mutex<Vec<&'static str>>,
        rejected: Mutex<Vec<RejectReason>>,
    }

    impl FloorObserver for Recorder {
        fn on_applied(&self, event: &RestaurantEvent, _state: &RestaurantState) {
            self.applied.lock().unwrap().push(event.kind());
        }

        fn on_rejected(&self, _event: &RestaurantEvent, reason: &RejectReason) {
            self.rejected.lock().unwrap().push(reason.clone());
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 19, 0, 0).unwrap()
    }

    fn store_with(clock: &ManualClock, recorder: &Arc<Recorder>) -> FloorStore {
        FloorStore::new(TransitionEngine::default(), RestaurantState::with_tables(4))
            .with_clock(Arc::new(clock.clone()))
            .with_observer(recorder.clone())
    }

    fn dosa_order(table_id: &str) -> RestaurantEvent {
        let menu = MenuCatalog::house_menu();
        let mut cart = Cart::new();
        cart.add(menu.get("sth-1").unwrap()).unwrap();
        cart.to_place_order(table_id)
    }

    #[tokio::test]
    async fn test_dispatch_swaps_snapshot() {
        let clock = ManualClock::new(start());
        let recorder = Arc::new(Recorder::default());
        let store = store_with(&clock, &recorder);

        let before = store.snapshot().await;
        let outcome = store.dispatch(dosa_order("table-2")).await.unwrap();
        assert!(outcome.is_applied());

        // Old snapshots are never touched.
        assert_eq!(before.table("table-2").unwrap().status, TableStatus::Free);

        let after = store.snapshot().await;
        assert!(Arc::ptr_eq(&after, outcome.state()));
        assert_eq!(after.table("table-2").unwrap().status, TableStatus::Occupied);
        assert_eq!(after.orders[0].created_at, start());
        assert_eq!(*recorder.applied.lock().unwrap(), vec!["PLACE_ORDER"]);
    }

    #[tokio::test]
    async fn test_rejection_leaves_state() {
        let clock = ManualClock::new(start());
        let recorder = Arc::new(Recorder::default());
        let store = store_with(&clock, &recorder);
        store.dispatch(dosa_order("table-1")).await.unwrap();
        let before = store.snapshot().await;

        let err = store.dispatch(dosa_order("table-1")).await.unwrap_err();
        assert!(err.is_rejection());
        assert!(Arc::ptr_eq(&before, &store.snapshot().await));
        assert_eq!(recorder.rejected.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unchanged_keeps_snapshot() {
        let clock = ManualClock::new(start());
        let recorder = Arc::new(Recorder::default());
        let store = store_with(&clock, &recorder);
        let before = store.snapshot().await;

        let outcome = store
            .dispatch(RestaurantEvent::check_timer("table-3"))
            .await
            .unwrap();
        assert!(!outcome.is_applied());
        assert!(Arc::ptr_eq(&before, outcome.state()));
        assert!(recorder.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_uses_store_clock() {
        let clock = ManualClock::new(start());
        let recorder = Arc::new(Recorder::default());
        let store = store_with(&clock, &recorder);

        store.dispatch(dosa_order("table-4")).await.unwrap();
        let item = store.snapshot().await.order_items[0].id.clone();

        clock.advance(Duration::minutes(20));
        store.dispatch(RestaurantEvent::mark_served(item)).await.unwrap();

        let state = store.snapshot().await;
        let table = state.table("table-4").unwrap();
        assert_eq!(table.status, TableStatus::AlmostFree);
        assert_eq!(
            table.almost_free_end_time,
            Some(start() + Duration::minutes(22))
        );
    }

    #[tokio::test]
    async fn test_dispatch_json() {
        let clock = ManualClock::new(start());
        let recorder = Arc::new(Recorder::default());
        let store = store_with(&clock, &recorder);

        let outcome = store
            .dispatch_json(r#"{"type":"CUSTOMER_LEFT","payload":{"tableId":"table-1"}}"#)
            .await
            .unwrap();
        assert!(outcome.is_applied());

        let outcome = store
            .dispatch_json(r#"{"type":"RING_BELL","payload":{}}"#)
            .await
            .unwrap();
        assert!(!outcome.is_applied());

        let err = store
            .dispatch_json(r#"{"type":"MARK_CLEANED","payload":{}}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, FloorError::MalformedEvent { .. }));
    }

    /// A PLACE_ORDER envelope for table-2 with one dosa line per quantity.
    fn place_order_json(quantities: &[u64]) -> String {
        let lines: Vec<String> = quantities
            .iter()
            .map(|q| {
                format!(
                    r#"{{"menuItem":{{"id":"sth-1","name":"Masala Dosa","category":"South Indian","prepTime":12,"price":15000}},"quantity":{}}}"#,
                    q
                )
            })
            .collect();
        format!(
            r#"{{"type":"PLACE_ORDER","payload":{{"tableId":"table-2","items":[{}],"totalAmount":15000}}}}"#,
            lines.join(",")
        )
    }

    #[tokio::test]
    async fn test_dispatch_json_rejects_bad_quantities() {
        let clock = ManualClock::new(start());
        let recorder = Arc::new(Recorder::default());
        let store = store_with(&clock, &recorder);
        let before = store.snapshot().await;

        for quantities in [
            vec![0],
            vec![2, 0],
            vec![u64::from(tableflow_core::MAX_ITEM_QUANTITY) + 1],
            vec![u64::from(u32::MAX), 1],
        ] {
            let err = store
                .dispatch_json(&place_order_json(&quantities))
                .await
                .unwrap_err();
            assert!(
                matches!(err.reject_reason(), Some(RejectReason::InvalidOrder { .. })),
                "{:?} gave {:?}",
                quantities,
                err
            );
        }

        assert!(Arc::ptr_eq(&before, &store.snapshot().await));
        assert_eq!(recorder.rejected.lock().unwrap().len(), 4);
        assert!(recorder.applied.lock().unwrap().is_empty());

        let outcome = store.dispatch_json(&place_order_json(&[2])).await.unwrap();
        assert!(outcome.is_applied());
        assert_eq!(outcome.state().order_items.len(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = FloorStore::from_config(&FloorConfig::default())
            .with_observer(Arc::new(crate::observer::NoOpObserver));
        let other = store.clone();

        other.dispatch(RestaurantEvent::customer_left("table-10")).await.unwrap();
        assert_eq!(store.snapshot().await.cleaning_queue().len(), 1);

        store.reset(RestaurantState::with_tables(2)).await;
        assert_eq!(other.snapshot().await.tables.len(), 2);
    }
}
