//! # Error Types
//!
//! Domain-specific error types for tableflow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tableflow-core (this file)                                            │
//! │  ├── RejectReason     - Why the engine refused an event                │
//! │  ├── ValidationError  - Input validation failures (cart, menu)         │
//! │  └── CoreError        - Wraps both, plus malformed event envelopes     │
//! │                                                                         │
//! │  tableflow-floor (separate crate)                                      │
//! │  └── FloorError       - Runtime, config and dispatch failures          │
//! │                                                                         │
//! │  Flow: RejectReason → CoreError → FloorError → caller / view           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{ItemStatus, TableStatus};

// =============================================================================
// Reject Reason
// =============================================================================

/// Why the transition engine refused an event.
///
/// A rejected event leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Order item not found: {0}")]
    OrderItemNotFound(String),

    /// PLACE_ORDER onto a table that already has guests or needs cleaning.
    ///
    /// ## User Workflow
    /// ```text
    /// Guest scans QR on table 4 ──► pays ──► PLACE_ORDER(table-4)
    ///                                              │
    ///                              table-4 is EATING
    ///                                              ▼
    ///                TableNotFree { table_id: "table-4", status: Eating }
    /// ```
    #[error("Table {table_id} is {status}, cannot take a new order")]
    TableNotFree {
        table_id: String,
        status: TableStatus,
    },

    /// The item's order is no longer in service (guests left, table cleaning).
    #[error("Order {0} is already closed")]
    OrderAlreadyClosed(String),

    #[error("Order for {0} has no items")]
    EmptyOrder(String),

    /// PLACE_ORDER lines that no cart could have produced (zero or
    /// oversized quantities, too many lines).
    #[error("Order for {table_id} is invalid: {reason}")]
    InvalidOrder {
        table_id: String,
        reason: ValidationError,
    },

    #[error("Item {item_id} cannot move from {from} back to {to}")]
    ItemStatusRegression {
        item_id: String,
        from: ItemStatus,
        to: ItemStatus,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for carts and the menu catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),
}

// =============================================================================
// Core Error
// =============================================================================

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Rejected(#[from] RejectReason),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A known event kind whose payload does not parse.
    #[error("Malformed {kind} event: {reason}")]
    MalformedEvent { kind: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_messages() {
        let err = RejectReason::TableNotFree {
            table_id: "table-4".to_string(),
            status: TableStatus::Eating,
        };
        assert_eq!(
            err.to_string(),
            "Table table-4 is EATING, cannot take a new order"
        );

        let err = RejectReason::ItemStatusRegression {
            item_id: "item-1".to_string(),
            from: ItemStatus::Served,
            to: ItemStatus::Cooking,
        };
        assert_eq!(
            err.to_string(),
            "Item item-1 cannot move from SERVED back to COOKING"
        );

        let err = RejectReason::InvalidOrder {
            table_id: "table-2".to_string(),
            reason: ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: 20,
            },
        };
        assert_eq!(
            err.to_string(),
            "Order for table-2 is invalid: quantity must be between 1 and 20"
        );
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core: CoreError = RejectReason::TableNotFound("table-99".into()).into();
        assert!(matches!(core, CoreError::Rejected(_)));
        assert_eq!(core.to_string(), "Table not found: table-99");

        let core: CoreError = ValidationError::Required {
            field: "cart".into(),
        }
        .into();
        assert!(matches!(core, CoreError::Validation(_)));
    }
}
