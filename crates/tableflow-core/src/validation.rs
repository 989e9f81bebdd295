//! # Validation Module
//!
//! Input checks for the menu catalog and the guest cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Cart / catalog construction (THIS MODULE)                    │
//! │  ├── quantities, line counts, menu item fields                         │
//! │  └── fails before anything reaches the engine                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Transition engine                                            │
//! │  ├── table exists, table is FREE, order has lines                      │
//! │  ├── every line re-checked here (events can bypass the cart)           │
//! │  └── RejectReason, state untouched                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::menu::CartLine;
use crate::types::MenuItem;
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY, MAX_TABLES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a catalog entry.
///
/// ## Rules
/// - id, name and category must not be blank
/// - price must not be negative
///
/// ## Example
/// ```rust
/// use tableflow_core::menu::MenuCatalog;
/// use tableflow_core::validation::validate_menu_item;
///
/// let menu = MenuCatalog::house_menu();
/// assert!(validate_menu_item(&menu.items()[0]).is_ok());
/// ```
pub fn validate_menu_item(item: &MenuItem) -> ValidationResult<()> {
    for (field, value) in [
        ("menu item id", &item.id),
        ("menu item name", &item.name),
        ("menu item category", &item.category),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    if item.price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a per-line quantity: 1..=MAX_ITEM_QUANTITY.
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 || quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }
    Ok(())
}

pub fn validate_cart_line_count(lines: usize) -> ValidationResult<()> {
    if lines > MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 1,
            max: MAX_CART_LINES as i64,
        });
    }
    Ok(())
}

/// Validates a cart about to be paid for.
///
/// Carts built through [`Cart`](crate::menu::Cart) already satisfy the
/// per-line rules; this also covers lines that arrived over the wire.
pub fn validate_cart(lines: &[CartLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "cart".to_string(),
        });
    }
    validate_cart_line_count(lines.len())?;
    for line in lines {
        validate_menu_item(&line.menu_item)?;
        validate_quantity(line.quantity)?;
    }
    Ok(())
}

/// Validates a floor size: 1..=MAX_TABLES.
pub fn validate_table_count(count: u32) -> ValidationResult<()> {
    if count == 0 || count > MAX_TABLES {
        return Err(ValidationError::OutOfRange {
            field: "table_count".to_string(),
            min: 1,
            max: MAX_TABLES as i64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuCatalog;
    use crate::money::Money;

    fn dosa() -> MenuItem {
        MenuCatalog::house_menu().items()[0].clone()
    }

    #[test]
    fn test_menu_item_rules() {
        assert!(validate_menu_item(&dosa()).is_ok());

        let mut blank = dosa();
        blank.name = "  ".to_string();
        assert_eq!(
            validate_menu_item(&blank),
            Err(ValidationError::Required {
                field: "menu item name".to_string()
            })
        );

        let mut negative = dosa();
        negative.price = Money::from_minor(-1);
        assert!(validate_menu_item(&negative).is_err());
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_cart_rules() {
        assert!(validate_cart(&[]).is_err());

        let line = CartLine {
            menu_item: dosa(),
            quantity: 2,
        };
        assert!(validate_cart(std::slice::from_ref(&line)).is_ok());

        let zero = CartLine {
            quantity: 0,
            ..line
        };
        assert!(validate_cart(&[zero]).is_err());
    }

    #[test]
    fn test_table_count_bounds() {
        assert!(validate_table_count(0).is_err());
        assert!(validate_table_count(10).is_ok());
        assert!(validate_table_count(MAX_TABLES + 1).is_err());
    }
}
