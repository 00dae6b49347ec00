//! # Domain Types
//!
//! Cart line types shared by the store, the storage record and the
//! storefront frontend (via generated TypeScript bindings).
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   add_to_cart   ┌─────────────────┐               │
//! │  │   NewCartItem   │ ──────────────► │    CartItem     │               │
//! │  │  ─────────────  │   + quantity    │  ─────────────  │               │
//! │  │  id (ProductId) │                 │  id             │               │
//! │  │  name           │                 │  name, price    │               │
//! │  │  price (Money)  │                 │  image          │               │
//! │  │  image (URI)    │                 │  quantity ≥ 1   │               │
//! │  └─────────────────┘                 └────────┬────────┘               │
//! │                                               │ ordered, unique by id  │
//! │                                      ┌────────▼────────┐               │
//! │                                      │  CartSnapshot   │               │
//! │                                      │  items          │               │
//! │                                      │  itemCount      │               │
//! │                                      └─────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog product identifier; the identity key of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(i64);

impl ProductId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Cart Items
// =============================================================================

/// A product as handed to "add to bag", before a quantity is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewCartItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price at the time the product was added
    pub price: Money,
    /// Product image URI shown in the cart drawer
    pub image: String,
}

impl NewCartItem {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        NewCartItem {
            id,
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// One line of the cart.
///
/// ## Invariants
/// - `quantity >= 1` (lines that would drop to zero are removed instead)
/// - at most one line per `id` within a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub quantity: i64,
}

impl CartItem {
    /// Attaches a quantity to a new item.
    pub fn from_new(item: NewCartItem, quantity: i64) -> Self {
        CartItem {
            id: item.id,
            name: item.name,
            price: item.price,
            image: item.image,
            quantity,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Owned view of the cart handed to consumers and written to storage.
///
/// Serialized as `{ "items": [...], "itemCount": n }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    /// Sum of `items[*].quantity`
    #[serde(default)]
    pub item_count: i64,
}
