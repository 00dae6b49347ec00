//! # lumiere-core: Pure Cart Logic for the Lumière Storefront
//!
//! This crate holds the cart state machine behind the storefront's
//! cart badge, cart drawer and cart page. Everything here is a pure
//! function over owned data: no storage, no network, no logging.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Lumière Cart Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront UI (product, cart, header)              │   │
//! │  │    "Add to bag" ──► quantity stepper ──► remove ──► badge       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          lumiere-cart (CartStore, storage port, config)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lumiere-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ CartItem  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ ProductId │  │  parsing  │  │ reducer   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart line types (`ProductId`, `NewCartItem`, `CartItem`, `CartSnapshot`)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The `Cart` reducer
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use lumiere_core::{Cart, Money, NewCartItem, ProductId};
//!
//! let mut cart = Cart::new();
//! let serum = NewCartItem::new(ProductId::new(1), "Rose Serum", Money::from_cents(2450), "/img/serum.jpg");
//!
//! cart.add_item(serum.clone(), 2).unwrap();
//! cart.add_item(serum, 3).unwrap();
//!
//! assert_eq!(cart.item_count(), 5);
//! assert_eq!(cart.items().len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart record lives under.
///
/// Every session of the storefront reads and writes the same key, so a
/// reload picks up the cart the shopper left behind.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Version stamped on persisted cart records.
///
/// Bump when the shape of [`CartSnapshot`] changes incompatibly; records
/// carrying another version are discarded on load.
pub const CART_RECORD_VERSION: u32 = 0;
