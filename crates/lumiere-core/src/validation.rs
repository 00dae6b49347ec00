//! # Validation Module
//!
//! Input checks applied before a product enters the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  ├── Quantity stepper never goes below 1                               │
//! │  └── Stock limits ("only 3 left")                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── quantity > 0                                                      │
//! │  ├── price >= 0                                                        │
//! │  └── name / image taken as given                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart reducer                                                 │
//! │  └── merge by id, drop lines at quantity <= 0                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lumiere_core::validation::{validate_price, validate_quantity};
//! use lumiere_core::Money;
//!
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_price(Money::from_cents(0)).is_ok());
//! assert!(validate_price(Money::from_cents(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::NewCartItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity passed to "add to bag".
///
/// ## Rules
/// - Must be positive (> 0)
/// - No upper bound: stock limits belong to the product page
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (samples, gifts with purchase)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates an item about to be added.
///
/// Only the price is constrained. Name and image are display data and any
/// string is accepted, including empty ones and `data:` URIs.
pub fn validate_new_item(item: &NewCartItem) -> ValidationResult<()> {
    validate_price(item.price)
}

// =============================================================================
// Unit Tests
// =============================================================================
