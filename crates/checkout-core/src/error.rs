//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError          - Domain rule violations                       │
//! │  └── ValidationError    - Input validation failures                    │
//! │                                                                         │
//! │  checkout-service errors                                               │
//! │  ├── CollaboratorError  - Gateway / repository / notifier faults       │
//! │  └── CheckoutError      - What the caller of a checkout sees           │
//! │                                                                         │
//! │  checkout-db errors                                                    │
//! │  └── DbError            - Database operation failures                  │
//! │                                                                         │
//! │  Flow: CoreError (pricing) → CheckoutError → caller                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A declined payment is NOT an error anywhere in this hierarchy. It is a
//! normal business outcome reported as "no order".

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart's subtotal does not fit in a `Money`.
    #[error("Subtotal of {items} items is too large to charge")]
    AmountOverflow { items: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::Item::new`], by the `FromStr` impls and by
/// [`crate::validation`] when data arrives from outside (cart files).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AmountOverflow { items: 2 };
        assert_eq!(err.to_string(), "Subtotal of 2 items is too large to charge");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::NotAllowed {
            field: "tier".to_string(),
            allowed: vec!["standard".to_string()],
        };
        assert_eq!(err.to_string(), "tier must be one of: [\"standard\"]");

        let err = ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: 10,
        };
        assert_eq!(err.to_string(), "unit_price must be between 0 and 10");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: i64::MAX,
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
