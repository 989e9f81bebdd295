//! # tableflow-floor: Restaurant Floor Runtime
//!
//! Runs the pure engine from `tableflow-core` as a live floor: one store
//! that owns the state, a timer monitor that watches ALMOST_FREE tables, and
//! a checkout that turns a paid cart into an order.
//!
//! ## Task Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Floor Runtime                                    │
//! │                                                                         │
//! │   Host / Kitchen / Cleaning views        Guest                         │
//! │        │  dispatch(event)                  │  pay_and_place(cart)       │
//! │        ▼                                   ▼                            │
//! │   ┌──────────────────────────────────────────────────────┐             │
//! │   │ FloorStore  (Arc<RwLock<Arc<RestaurantState>>>)       │◄── Clock    │
//! │   │   engine.apply under the write lock                   │──► Observer │
//! │   └──────────────────────────────────────────────────────┘             │
//! │        ▲                                                                │
//! │        │  CHECK_TIMER for expired tables                                │
//! │   ┌────┴─────────┐                                                      │
//! │   │ TimerMonitor │  tokio task, interval + shutdown channel             │
//! │   └──────────────┘                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tableflow_floor::{FloorConfig, FloorStore, TimerMonitor};
//!
//! # async fn example() -> tableflow_floor::FloorResult<()> {
//! let config = FloorConfig::load(None)?;
//! let store = FloorStore::from_config(&config);
//! let monitor = TimerMonitor::spawn(store.clone(), config.poll_interval());
//!
//! // ... dispatch events through `store` ...
//!
//! monitor.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod checkout;
pub mod clock;
pub mod config;
pub mod error;
pub mod monitor;
pub mod observer;
pub mod store;

pub use checkout::{Checkout, Receipt};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::FloorConfig;
pub use error::{FloorError, FloorResult};
pub use monitor::{RunningMonitor, TimerMonitor, TimerMonitorHandle};
pub use observer::{FloorObserver, NoOpObserver, TracingObserver};
pub use store::{Dispatched, FloorStore};

/// How often the timer monitor polls, matching a one-second countdown display.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Simulated payment time before an order is placed.
pub const DEFAULT_PAYMENT_DELAY_MS: u64 = 2000;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
