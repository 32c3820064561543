//! # Validation Module
//!
//! Input validation for data entering a checkout.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Constructors                                                 │
//! │  └── Item::new  → validate_item                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialized data (cart request files)                       │
//! │  └── THIS MODULE: validate_cart on every item                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (total_cents >= 0)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The only data rule is that unit prices are non-negative. User ids, names
//! and contact addresses are opaque strings handed to the collaborators as
//! they are. The payment instrument belongs to the gateway.

use crate::error::{CoreResult, ValidationError};
use crate::types::{Cart, Item};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_price_cents(item.unit_price().cents())
}

/// Validates every item of a cart.
///
/// Deserialized carts skip [`Item::new`], so callers that read a cart from
/// outside run this before checkout.
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_cart;
/// use checkout_core::Cart;
///
/// let cart: Cart = serde_json::from_str(
///     r#"{"user": {"id": "1", "name": "Usuario", "email": "padrao"},
///         "items": [{"name": "Item", "unit_price": 100}]}"#,
/// ).unwrap();
/// assert!(validate_cart(&cart).is_ok());
/// ```
pub fn validate_cart(cart: &Cart) -> CoreResult<()> {
    for item in cart.items() {
        validate_item(item)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::money::Money;
    use crate::types::{MembershipTier, User};

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(i64::MAX).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_item_constructor_rejects_negative_price() {
        let err = Item::new("Coupon", Money::from_cents(-500)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_item_name_is_not_checked() {
        assert!(Item::new("", Money::from_cents(100)).is_ok());
    }

    #[test]
    fn test_any_user_and_cart_size_is_accepted() {
        let user = User::new("", "", "padrao", MembershipTier::Standard);
        let item = Item::new("Pen", Money::from_cents(1)).unwrap();
        let cart = Cart::new(user, vec![item; 101]);

        assert!(validate_cart(&cart).is_ok());
    }

    #[test]
    fn test_validate_deserialized_cart_catches_bad_item() {
        let json = r#"{
            "user": {"id": "1", "name": "S", "email": "s@example.com"},
            "items": [{"name": "Broken", "unit_price": -1}]
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert!(matches!(validate_cart(&cart), Err(CoreError::Validation(_))));
    }
}
