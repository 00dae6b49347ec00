//! # Persisted Cart Record
//!
//! The single JSON document stored under the cart key:
//!
//! ```json
//! {
//!   "state": {
//!     "items": [
//!       { "id": 1, "name": "Rose Serum", "price": 2450, "image": "/img/serum.jpg", "quantity": 2 }
//!     ],
//!     "itemCount": 2
//!   },
//!   "version": 0,
//!   "savedAt": "2026-10-15T09:30:00Z"
//! }
//! ```
//!
//! `savedAt` is informational and optional on read. `itemCount` is
//! recomputed from `items` on read.

use chrono::{DateTime, Utc};
use lumiere_core::{Cart, CartSnapshot, CART_RECORD_VERSION};
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Envelope around a [`CartSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCart {
    pub state: CartSnapshot,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl PersistedCart {
    /// Wraps the cart's current state, stamped with the current version and time.
    pub fn from_cart(cart: &Cart) -> Self {
        PersistedCart {
            state: cart.snapshot(),
            version: CART_RECORD_VERSION,
            saved_at: Some(Utc::now()),
        }
    }
}

/// Serializes `cart` into the stored record format.
pub fn encode(cart: &Cart) -> StorageResult<String> {
    Ok(serde_json::to_string(&PersistedCart::from_cart(cart))?)
}

/// Parses a stored record back into a cart.
///
/// ## Errors
/// - Malformed JSON or a missing `state` → `Serialization`
/// - A `version` other than [`CART_RECORD_VERSION`] → `UnsupportedVersion`
pub fn decode(raw: &str) -> StorageResult<Cart> {
    let record: PersistedCart = serde_json::from_str(raw)?;

    if record.version != CART_RECORD_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: record.version,
            expected: CART_RECORD_VERSION,
        });
    }

    Ok(Cart::from(record.state))
}
