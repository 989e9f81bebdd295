//! # tableflow-core: Pure Restaurant State Engine
//!
//! Tables, orders and order items, and the transition engine that moves
//! them through their lifecycles. No I/O, no clocks, no tasks.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tableflow Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Views (host board, kitchen display, cleaning)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ events / snapshots                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │       tableflow-floor (store, timer monitor, checkout)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ tableflow-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │  engine  │ │  derive  │ │  query   │          │   │
//! │  │   │  Table   │ │  apply   │ │ cooking  │ │ kitchen  │          │   │
//! │  │   │  Order   │ │ Transit. │ │ serving  │ │ counts   │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  event   │ │ envelope │ │   menu   │ │  money   │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Tables, orders, order items, statuses
//! - [`event`] - The seven events
//! - [`engine`] - `apply(state, event, now) → Transition`
//! - [`derive`] - Table status derived from item events
//! - [`query`] - Read-only projections for the views
//! - [`envelope`] - JSON decoding of incoming events
//! - [`menu`] - Menu catalog and guest cart
//! - [`money`] - Integer money
//! - [`validation`] - Cart and catalog checks
//! - [`error`] - Rejection reasons and errors
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use tableflow_core::{Cart, MenuCatalog, RestaurantState, TableStatus, TransitionEngine};
//!
//! let engine = TransitionEngine::default();
//! let menu = MenuCatalog::house_menu();
//! let state = RestaurantState::with_tables(10);
//!
//! let mut cart = Cart::new();
//! cart.add_quantity(menu.get("sth-1").unwrap(), 2).unwrap();
//!
//! let state = engine
//!     .apply(&state, &cart.to_place_order("table-3"), Utc::now())
//!     .into_state()
//!     .unwrap();
//!
//! assert_eq!(state.table("table-3").unwrap().status, TableStatus::Occupied);
//! assert_eq!(state.order_items.len(), 2);
//! ```

pub mod derive;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod event;
pub mod menu;
pub mod money;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::{EngineConfig, Transition, TransitionEngine};
pub use envelope::{decode_event, encode_event};
pub use error::{CoreError, CoreResult, RejectReason, ValidationError};
pub use event::RestaurantEvent;
pub use menu::{Cart, CartLine, MenuCatalog};
pub use money::Money;
pub use query::{format_countdown, ItemStatusCounts, KitchenFilter, TableStatusCounts};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tables on the floor when nothing else is configured.
pub const DEFAULT_TABLE_COUNT: u32 = 10;

/// Upper bound on the configured floor size.
pub const MAX_TABLES: u32 = 200;

/// Default ALMOST_FREE countdown: 2 minutes.
///
/// Short enough to demo. A real dining room would run closer to 12 minutes.
pub const DEFAULT_ALMOST_FREE_SECS: u64 = 120;

/// Maximum units of one dish in a single cart.
pub const MAX_ITEM_QUANTITY: u32 = 20;

/// Maximum distinct dishes in a single cart.
pub const MAX_CART_LINES: usize = 50;
