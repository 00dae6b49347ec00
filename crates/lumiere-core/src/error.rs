//! # Error Types
//!
//! Domain-specific error types for lumiere-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lumiere-core errors (this file)                                       │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  lumiere-cart errors (separate crate)                                  │
//! │  ├── StorageError     - Storage port failures                          │
//! │  └── StoreError       - Construction / configuration failures          │
//! │                                                                         │
//! │  The store's mutation API never surfaces these: a rejected add is      │
//! │  logged and dropped, the cart stays as it was.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations raised by the [`Cart`](crate::Cart) reducer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Adding to an existing line would overflow its quantity.
    #[error("Quantity for product {id} would overflow: {current} + {added}")]
    QuantityOverflow {
        id: ProductId,
        current: i64,
        added: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityOverflow {
            id: ProductId::new(7),
            current: i64::MAX,
            added: 1,
        };
        assert_eq!(
            err.to_string(),
            format!("Quantity for product 7 would overflow: {} + 1", i64::MAX)
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
