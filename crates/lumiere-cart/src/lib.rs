//! # lumiere-cart: Cart Store for the Lumière Storefront
//!
//! One [`CartStore`] exists per shopper session. It owns the cart state,
//! mirrors it into an injected [`CartStorage`] after every change and
//! publishes snapshots to subscribers (header badge, cart drawer).
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Store Data Flow                             │
//! │                                                                         │
//! │  UI event ("Add to bag", stepper, remove, empty bag)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  lumiere-cart (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   CartHandle ──► CartStore ──► lumiere_core::Cart (reducer)     │   │
//! │  │                      │                                          │   │
//! │  │                      ├──► record::encode ──► CartStorage::save  │   │
//! │  │                      │        (best effort, failures logged)    │   │
//! │  │                      │                                          │   │
//! │  │                      └──► watch::Sender<CartSnapshot>           │   │
//! │  │                               (subscribers see latest state)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Storage backends: MemoryStorage, FileStorage (<dir>/<key>.json)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lumiere_cart::{CartStore, MemoryStorage};
//! use lumiere_core::{Money, NewCartItem, ProductId};
//!
//! let mut store = CartStore::new(MemoryStorage::new());
//! let balm = NewCartItem::new(ProductId::new(4), "Lip Balm", Money::from_cents(900), "/img/balm.jpg");
//!
//! store.add_to_cart(balm, 2);
//! store.update_quantity(ProductId::new(4), 1);
//!
//! assert_eq!(store.item_count(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod handle;
pub mod record;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{CartConfig, StorageBackend, StorageSettings};
pub use error::{StorageError, StorageResult, StoreError, StoreResult};
pub use handle::CartHandle;
pub use storage::{CartStorage, FileStorage, MemoryStorage};
pub use store::CartStore;
