//! # Tableflow Floor Demo
//!
//! Plays one table through a full service on a live floor.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (floor.toml, then `TABLEFLOW_*` overrides)
//! 3. Create the store and spawn the timer monitor
//! 4. Guest pays for 2× Masala Dosa at table 3
//! 5. Kitchen cooks, marks ready, serves
//! 6. Countdown runs out, monitor sends the table to cleaning
//! 7. Cleaning staff frees the table, monitor stops
//!
//! Set `TABLEFLOW_ALMOST_FREE_SECS=5` to shorten the wait.

use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tableflow_core::{
    format_countdown, Cart, KitchenFilter, MenuCatalog, RestaurantEvent, RestaurantState,
    TableStatus,
};
use tableflow_floor::{Checkout, FloorConfig, FloorError, FloorResult, FloorStore, TimerMonitor};

const TABLE: &str = "table-3";

/// Pause between staff actions so the log reads like a shift.
const STEP: Duration = Duration::from_millis(300);

#[tokio::main]
async fn main() -> FloorResult<()> {
    init_tracing();

    let config = FloorConfig::load_or_default(None);
    info!(
        tables = config.floor.table_count,
        almost_free_secs = config.timer.almost_free_secs,
        "Floor opening"
    );

    let store = FloorStore::from_config(&config);
    let monitor = TimerMonitor::spawn(store.clone(), config.poll_interval());
    let checkout = Checkout::from_config(store.clone(), &config);
    let menu = MenuCatalog::house_menu();

    // Guest
    let mut cart = Cart::new();
    for _ in 0..2 {
        if let Some(dosa) = menu.get("sth-1") {
            cart.add(dosa)?;
        }
    }
    info!(total = %config.format_amount(cart.total()), "Guest checks out");
    let receipt = checkout.pay_and_place(TABLE, &cart).await?;
    info!(order_id = %receipt.order_id, items = receipt.item_count, "Order placed");

    // A second guest picks the same table.
    match checkout.pay_and_place(TABLE, &cart).await {
        Err(FloorError::Rejected(reason)) => info!(%reason, "Second guest turned away"),
        other => warn!(?other, "Second guest was not turned away"),
    }

    // Kitchen
    let item_ids: Vec<String> = store
        .snapshot()
        .await
        .kitchen_queue(&KitchenFilter::table(TABLE))
        .iter()
        .map(|item| item.id.clone())
        .collect();

    for id in &item_ids {
        store.dispatch(RestaurantEvent::start_cooking(id)).await?;
        tokio::time::sleep(STEP).await;
    }
    log_board(&*store.snapshot().await);

    for id in &item_ids {
        store.dispatch(RestaurantEvent::mark_ready(id)).await?;
        tokio::time::sleep(STEP).await;
    }
    for id in &item_ids {
        store.dispatch(RestaurantEvent::mark_served(id)).await?;
        log_board(&*store.snapshot().await);
        tokio::time::sleep(STEP).await;
    }

    // Views may send kinds this floor does not know; they are ignored.
    store
        .dispatch_json(r#"{"type":"CALL_WAITER","payload":{"tableId":"table-3"}}"#)
        .await?;

    // Countdown
    loop {
        let state = store.snapshot().await;
        let status = state.table(TABLE).map(|t| t.status);
        if status != Some(TableStatus::AlmostFree) {
            break;
        }
        if let Some(remaining) = state.remaining_almost_free(TABLE, store.now()) {
            info!(table = TABLE, remaining = %format_countdown(remaining), "Almost free");
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    log_board(&*store.snapshot().await);

    // Cleaning
    for table in store.snapshot().await.cleaning_queue() {
        info!(table = %table.id, "Cleaning table");
    }
    store.dispatch(RestaurantEvent::mark_cleaned(TABLE)).await?;
    log_board(&*store.snapshot().await);

    monitor.stop().await?;
    info!("Floor closed");
    Ok(())
}

fn log_board(state: &RestaurantState) {
    let tables = state.table_counts();
    let items = state.item_counts();
    let status = state
        .table(TABLE)
        .map(|t| t.status.to_string())
        .unwrap_or_default();
    info!(
        table = TABLE,
        %status,
        free = tables.free,
        cleaning = tables.cleaning,
        pending = items.pending,
        cooking = items.cooking,
        ready = items.ready,
        served = items.served,
        "Board"
    );
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tableflow_floor=trace` - Show trace for the runtime only
/// - Default: INFO, DEBUG for tableflow crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tableflow_floor=debug,floor_demo=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
