//! # Checkout Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Pricing fault (subtotal too large) ──► CheckoutError::Pricing        │
//! │                                                                         │
//! │  Collaborator fault (gateway / repository / notifier)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CollaboratorError ← what adapters return                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutError ← tagged with the step that failed and what already     │
//! │       │          happened (amount charged, order recorded)             │
//! │       ▼                                                                 │
//! │  Caller decides: refund, retry notification, alert                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A declined payment never shows up here. It is `Ok(None)`.
//!
//! Nothing is compensated by the orchestrator. A persistence fault after a
//! successful charge leaves the charge authorized, and a notification fault
//! leaves the order recorded without a confirmation. The variants carry what
//! the caller needs to close those gaps itself.

use checkout_core::{CoreError, Money, Order};
use thiserror::Error;

/// Faults reported by a collaborator implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The collaborator refused the request (bad data, constraint).
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The collaborator failed internally.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Everything a checkout attempt can fail with.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart could not be priced. No collaborator was called.
    #[error("Cart could not be priced: {0}")]
    Pricing(#[from] CoreError),

    /// The gateway faulted. Nothing was charged.
    #[error("Payment gateway failed: {0}")]
    Gateway(#[source] CollaboratorError),

    /// The charge went through but the order could not be recorded.
    #[error("Charged {charged} but the order was not saved: {source}")]
    Persistence {
        charged: Money,
        #[source]
        source: CollaboratorError,
    },

    /// The order was recorded but the confirmation was not sent.
    #[error("Order {} saved but the confirmation was not sent: {source}", .order.id)]
    Notification {
        order: Box<Order>,
        #[source]
        source: CollaboratorError,
    },
}

impl CheckoutError {
    /// Amount the customer was charged before the failure, if any.
    pub fn charged_amount(&self) -> Option<Money> {
        match self {
            CheckoutError::Pricing(_) | CheckoutError::Gateway(_) => None,
            CheckoutError::Persistence { charged, .. } => Some(*charged),
            CheckoutError::Notification { order, .. } => Some(order.total),
        }
    }

    /// The recorded order, when the failure happened after persistence.
    pub fn recorded_order(&self) -> Option<&Order> {
        match self {
            CheckoutError::Notification { order, .. } => Some(order.as_ref()),
            _ => None,
        }
    }
}

/// Result type for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Cart, MembershipTier, NewOrder, OrderId, User};

    fn order() -> Order {
        let user = User::new("1", "Customer", "customer@example.com", MembershipTier::Standard);
        NewOrder::processed(Cart::empty(user), Money::from_cents(15000)).into_order(OrderId::new(9))
    }

    #[test]
    fn test_error_messages() {
        let err = CheckoutError::Persistence {
            charged: Money::from_cents(18000),
            source: CollaboratorError::Unavailable("db down".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Charged $180.00 but the order was not saved: Service unavailable: db down"
        );

        let err = CheckoutError::Notification {
            order: Box::new(order()),
            source: CollaboratorError::Internal("smtp".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Order 9 saved but the confirmation was not sent: Internal error: smtp"
        );
    }

    #[test]
    fn test_charged_amount() {
        let gateway = CheckoutError::Gateway(CollaboratorError::Unavailable("timeout".into()));
        assert_eq!(gateway.charged_amount(), None);

        let pricing = CheckoutError::from(CoreError::AmountOverflow { items: 2 });
        assert_eq!(pricing.charged_amount(), None);
        assert_eq!(
            pricing.to_string(),
            "Cart could not be priced: Subtotal of 2 items is too large to charge"
        );

        let persistence = CheckoutError::Persistence {
            charged: Money::from_cents(500),
            source: CollaboratorError::Internal("disk".into()),
        };
        assert_eq!(persistence.charged_amount(), Some(Money::from_cents(500)));
        assert!(persistence.recorded_order().is_none());

        let notification = CheckoutError::Notification {
            order: Box::new(order()),
            source: CollaboratorError::Rejected("bad address".into()),
        };
        assert_eq!(notification.charged_amount(), Some(Money::from_cents(15000)));
        assert_eq!(notification.recorded_order().map(|o| o.id), Some(OrderId::new(9)));
    }
}
