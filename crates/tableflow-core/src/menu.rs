//! # Menu Catalog and Cart
//!
//! The read-only menu the guest orders from, and the cart they build before
//! paying. Neither is part of restaurant state: a cart only becomes state
//! when it is turned into a PLACE_ORDER event.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MenuCatalog ──► guest taps "+" ──► Cart ──► pay ──► PLACE_ORDER       │
//! │  (read-only)                      (local)           (state changes)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::event::RestaurantEvent;
use crate::money::Money;
use crate::types::MenuItem;
use crate::validation::{
    validate_cart_line_count, validate_menu_item, validate_quantity, ValidationResult,
};

// =============================================================================
// Menu Catalog
// =============================================================================

/// The menu, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    /// Builds a catalog, validating each item and rejecting duplicate ids.
    pub fn new(items: Vec<MenuItem>) -> ValidationResult<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            validate_menu_item(item)?;
            if !seen.insert(item.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "menu item id".to_string(),
                    value: item.id.clone(),
                });
            }
        }
        Ok(MenuCatalog { items })
    }

    /// The house menu: five kitchen stations, three dishes each.
    pub fn house_menu() -> Self {
        let dish = |id: &str, name: &str, category: &str, prep_time: u32, price: i64| MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            prep_time,
            price: Money::from_major(price),
        };

        MenuCatalog {
            items: vec![
                dish("sth-1", "Masala Dosa", "South Indian", 10, 150),
                dish("sth-2", "Idli Sambar", "South Indian", 8, 100),
                dish("sth-3", "Medu Vada", "South Indian", 10, 120),
                dish("chn-1", "Veg Hakka Noodles", "Chinese", 12, 180),
                dish("chn-2", "Gobi Manchurian", "Chinese", 15, 190),
                dish("chn-3", "Veg Fried Rice", "Chinese", 12, 180),
                dish("ind-1", "Paneer Butter Masala", "Indian", 20, 250),
                dish("ind-2", "Dal Makhani", "Indian", 18, 220),
                dish("ind-3", "Butter Naan", "Indian", 5, 40),
                dish("mck-1", "Virgin Mojito", "Mocktail", 5, 140),
                dish("mck-2", "Blue Lagoon", "Mocktail", 5, 150),
                dish("mck-3", "Watermelon Cooler", "Mocktail", 5, 130),
                dish("cnt-1", "Veg Grilled Sandwich", "Continental", 10, 160),
                dish("cnt-2", "White Sauce Pasta", "Continental", 15, 240),
                dish("cnt-3", "Cheese Burger", "Continental", 15, 190),
            ],
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, menu_item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == menu_item_id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|i| i.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MenuItem> + 'a {
        self.items.iter().filter(move |i| i.category == category)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A menu item and how many units the guest wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub menu_item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.menu_item.price * self.quantity
    }
}

/// The guest's cart before payment.
///
/// ## Invariants
/// - Lines are unique by menu item id (adding again increases quantity)
/// - Every line has quantity ≥ 1 (decrementing to zero drops the line)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `item`.
    pub fn add(&mut self, item: &MenuItem) -> ValidationResult<()> {
        self.add_quantity(item, 1)
    }

    /// Adds `quantity` units of `item`, merging with an existing line.
    pub fn add_quantity(&mut self, item: &MenuItem, quantity: u32) -> ValidationResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_item.id == item.id) {
            let new_quantity = line.quantity.saturating_add(quantity);
            validate_quantity(new_quantity)?;
            line.quantity = new_quantity;
            return Ok(());
        }

        validate_quantity(quantity)?;
        validate_cart_line_count(self.lines.len() + 1)?;
        self.lines.push(CartLine {
            menu_item: item.clone(),
            quantity,
        });
        Ok(())
    }

    /// Removes one unit of the item. Returns false if it was not in the cart.
    pub fn remove_one(&mut self, menu_item_id: &str) -> bool {
        let Some(index) = self.lines.iter().position(|l| l.menu_item.id == menu_item_id) else {
            return false;
        };
        if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
        } else {
            self.lines.remove(index);
        }
        true
    }

    pub fn quantity_of(&self, menu_item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.menu_item.id == menu_item_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total units across all lines.
    pub fn total_units(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The PLACE_ORDER event for this cart, total computed once here.
    pub fn to_place_order(&self, table_id: impl Into<String>) -> RestaurantEvent {
        RestaurantEvent::place_order(table_id, self.lines.clone(), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_menu_categories() {
        let menu = MenuCatalog::house_menu();
        assert_eq!(menu.items().len(), 15);
        assert_eq!(
            menu.categories(),
            vec!["South Indian", "Chinese", "Indian", "Mocktail", "Continental"]
        );
        assert_eq!(menu.by_category("Mocktail").count(), 3);
        assert_eq!(menu.get("sth-1").map(|i| i.name.as_str()), Some("Masala Dosa"));
        assert!(menu.get("nope").is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let menu = MenuCatalog::house_menu();
        let mut items = menu.items().to_vec();
        items.push(items[0].clone());
        let err = MenuCatalog::new(items).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { .. }));
    }

    #[test]
    fn test_cart_add_and_remove() {
        let menu = MenuCatalog::house_menu();
        let dosa = menu.get("sth-1").unwrap();
        let naan = menu.get("ind-3").unwrap();

        let mut cart = Cart::new();
        cart.add(dosa).unwrap();
        cart.add(dosa).unwrap();
        cart.add(naan).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.quantity_of("sth-1"), 2);
        assert_eq!(cart.total_units(), 3);
        assert_eq!(cart.total(), Money::from_major(340));

        assert!(cart.remove_one("ind-3"));
        assert_eq!(cart.quantity_of("ind-3"), 0);
        assert_eq!(cart.lines().len(), 1);
        assert!(!cart.remove_one("ind-3"));

        assert!(cart.remove_one("sth-1"));
        assert_eq!(cart.quantity_of("sth-1"), 1);
    }

    #[test]
    fn test_cart_quantity_cap() {
        let menu = MenuCatalog::house_menu();
        let dosa = menu.get("sth-1").unwrap();
        let mut cart = Cart::new();
        cart.add_quantity(dosa, crate::MAX_ITEM_QUANTITY).unwrap();
        assert!(cart.add(dosa).is_err());
        assert_eq!(cart.quantity_of("sth-1"), crate::MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_cart_to_place_order() {
        let menu = MenuCatalog::house_menu();
        let mut cart = Cart::new();
        cart.add_quantity(menu.get("sth-1").unwrap(), 2).unwrap();

        match cart.to_place_order("table-3") {
            RestaurantEvent::PlaceOrder(order) => {
                assert_eq!(order.table_id, "table-3");
                assert_eq!(order.total_amount, Money::from_major(300));
                assert_eq!(order.items.len(), 1);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
