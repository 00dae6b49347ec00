//! # Cart Reducer
//!
//! The shopper's bag as a pure state machine.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add_item(item, q)          same id present?                            │
//! │       │                      ├── yes: line.quantity += q                │
//! │       │                      └── no:  push new line (keeps order)       │
//! │                                                                         │
//! │  update_quantity(id, q)     q <= 0 ──► remove_item(id)                  │
//! │                             q > 0  ──► line.quantity = q                │
//! │                                                                         │
//! │  remove_item(id)            retain lines where line.id != id            │
//! │                                                                         │
//! │  clear()                    items = [], item_count = 0                  │
//! │                                                                         │
//! │  After every change: item_count = Σ line.quantity (recomputed)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Absent ids are not errors: `remove_item` and `update_quantity` return
//! `false` and leave the cart untouched.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, CartSnapshot, NewCartItem, ProductId};
use crate::validation::{validate_new_item, validate_quantity};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `id` (adding the same product increases quantity)
/// - Every line has `quantity >= 1`
/// - Lines keep insertion order
/// - `item_count` equals the sum of line quantities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    item_count: i64,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from previously stored lines.
    ///
    /// Stored data is not trusted: lines sharing an id are merged into the
    /// first occurrence, lines with `quantity <= 0` or a negative price are
    /// dropped and the count is recomputed.
    pub fn restore(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Cart::new();

        for item in items {
            if item.quantity <= 0 || item.price.is_negative() {
                continue;
            }

            match cart.items.iter_mut().find(|line| line.id == item.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }

        cart.recount();
        cart
    }

    /// Adds a product or increases the quantity of its existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity grows by `quantity`; name,
    ///   price and image of the existing line are kept
    /// - Product not in cart: appended as a new line
    ///
    /// ## Errors
    /// - `quantity <= 0`, or a negative price
    /// - The merged quantity would overflow `i64`
    ///
    /// The cart is unchanged when an error is returned.
    pub fn add_item(&mut self, item: NewCartItem, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        validate_new_item(&item)?;

        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(CoreError::QuantityOverflow {
                    id: item.id,
                    current: line.quantity,
                    added: quantity,
                })?;
        } else {
            self.items.push(CartItem::from_new(item, quantity));
        }

        self.recount();
        Ok(())
    }

    /// Removes the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|line| line.id != id);

        if self.items.len() == initial_len {
            return false;
        }

        self.recount();
        true
    }

    /// Sets the quantity of the line for `id` (absolute, not a delta).
    ///
    /// `quantity <= 0` removes the line. Returns whether the cart changed.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        match self.items.iter_mut().find(|line| line.id == id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                self.recount();
                true
            }
            _ => false,
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
        self.item_count = 0;
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total units across all lines (what the header badge shows).
    pub fn item_count(&self) -> i64 {
        self.item_count
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Quantity of `id` in the cart, 0 when absent.
    pub fn quantity_of(&self, id: ProductId) -> i64 {
        self.get(id).map_or(0, |line| line.quantity)
    }

    /// Sum of line totals, before any shipping or promotions.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Owned copy of the lines and count.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            item_count: self.item_count,
        }
    }

    fn recount(&mut self) {
        self.item_count = self
            .items
            .iter()
            .map(|line| line.quantity)
            .fold(0, i64::saturating_add);
    }
}

/// Restores from a snapshot; the stored `item_count` is ignored and recomputed.
impl From<CartSnapshot> for Cart {
    fn from(snapshot: CartSnapshot) -> Self {
        Cart::restore(snapshot.items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
