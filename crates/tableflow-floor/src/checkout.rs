//! # Checkout
//!
//! Guest-side ordering: the cart is paid for (simulated by a delay), then
//! placed as one PLACE_ORDER.
//!
//! ```text
//! cart ──► validate ──► table FREE? ──► payment delay ──► PLACE_ORDER ──► Receipt
//!             │              │                                 │
//!             ▼              ▼                                 ▼
//!        Validation     Rejected(TableNotFree)      Rejected (table taken
//!                                                   during payment)
//! ```

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use tableflow_core::validation::validate_cart;
use tableflow_core::{Cart, Money, RejectReason, TableStatus};

use crate::config::FloorConfig;
use crate::error::{FloorError, FloorResult};
use crate::store::{Dispatched, FloorStore};

/// What the guest sees after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order_id: String,
    pub table_id: String,
    pub total_amount: Money,
    /// Individually tracked units sent to the kitchen.
    pub item_count: usize,
}

pub struct Checkout {
    store: FloorStore,
    payment_delay: Duration,
}

impl Checkout {
    pub fn new(store: FloorStore, payment_delay: Duration) -> Self {
        Checkout {
            store,
            payment_delay,
        }
    }

    pub fn from_config(store: FloorStore, config: &FloorConfig) -> Self {
        Self::new(store, config.payment_delay())
    }

    /// Takes payment for `cart` and places it on `table_id`.
    ///
    /// Fails before the payment delay if the cart is invalid or the table is
    /// not FREE. The engine checks the table again when the order lands.
    pub async fn pay_and_place(&self, table_id: &str, cart: &Cart) -> FloorResult<Receipt> {
        validate_cart(cart.lines())?;

        let snapshot = self.store.snapshot().await;
        let table = snapshot
            .table(table_id)
            .ok_or_else(|| RejectReason::TableNotFound(table_id.to_string()))?;
        if table.status != TableStatus::Free {
            return Err(RejectReason::TableNotFree {
                table_id: table.id.clone(),
                status: table.status,
            }
            .into());
        }

        let total = cart.total();
        info!(table_id, total = %total, units = cart.total_units(), "Processing payment");
        tokio::time::sleep(self.payment_delay).await;

        let state = match self.store.dispatch(cart.to_place_order(table_id)).await? {
            Dispatched::Applied(state) => state,
            Dispatched::Unchanged(_) => {
                return Err(FloorError::Internal(format!(
                    "PLACE_ORDER for {} changed nothing",
                    table_id
                )))
            }
        };

        let order = state.order_for_table(table_id).ok_or_else(|| {
            FloorError::Internal(format!("{} has no order after PLACE_ORDER", table_id))
        })?;

        info!(table_id, order_id = %order.id, "Order placed");
        Ok(Receipt {
            order_id: order.id.clone(),
            table_id: table_id.to_string(),
            total_amount: order.total_amount,
            item_count: order.item_ids.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpObserver;
    use std::sync::Arc;
    use tableflow_core::{
        MenuCatalog, RestaurantEvent, RestaurantState, TransitionEngine, ValidationError,
    };

    fn store() -> FloorStore {
        FloorStore::new(TransitionEngine::default(), RestaurantState::with_tables(5))
            .with_observer(Arc::new(NoOpObserver))
    }

    fn two_dosas() -> Cart {
        let menu = MenuCatalog::house_menu();
        let mut cart = Cart::new();
        cart.add_quantity(menu.get("sth-1").unwrap(), 2).unwrap();
        cart
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_lands_after_payment_delay() {
        let store = store();
        let checkout = Checkout::new(store.clone(), Duration::from_secs(2));
        let cart = two_dosas();

        let started = tokio::time::Instant::now();
        let receipt = checkout.pay_and_place("table-3", &cart).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));

        assert_eq!(receipt.total_amount, Money::from_major(300));
        assert_eq!(receipt.item_count, 2);

        let state = store.snapshot().await;
        let table = state.table("table-3").unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.order_id.as_deref(), Some(receipt.order_id.as_str()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_table_fails_before_payment() {
        let store = store();
        store
            .dispatch(RestaurantEvent::customer_left("table-2"))
            .await
            .unwrap();
        let checkout = Checkout::new(store.clone(), Duration::from_secs(2));

        let started = tokio::time::Instant::now();
        let err = checkout.pay_and_place("table-2", &two_dosas()).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(
            err.reject_reason(),
            Some(&RejectReason::TableNotFree {
                table_id: "table-2".into(),
                status: TableStatus::Cleaning,
            })
        );
    }

    #[tokio::test]
    async fn test_empty_cart_is_invalid() {
        let checkout = Checkout::new(store(), Duration::ZERO);
        let err = checkout.pay_and_place("table-1", &Cart::new()).await.unwrap_err();
        assert!(matches!(err, FloorError::Validation(ValidationError::Required { .. })));

        let err = checkout.pay_and_place("table-9", &two_dosas()).await.unwrap_err();
        assert!(err.is_rejection());
    }

    #[tokio::test(start_paused = true)]
    async fn test_table_taken_during_payment() {
        let store = store();
        let first = Checkout::new(store.clone(), Duration::from_secs(2));
        let second = Checkout::new(store.clone(), Duration::from_secs(3));
        let cart = two_dosas();

        let (a, b) = tokio::join!(
            first.pay_and_place("table-4", &cart),
            second.pay_and_place("table-4", &cart)
        );
        assert!(a.is_ok());
        assert!(b.unwrap_err().is_rejection());
        assert_eq!(store.snapshot().await.orders.len(), 1);
    }
}
