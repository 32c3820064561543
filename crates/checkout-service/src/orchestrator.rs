//! # Checkout Orchestrator
//!
//! Converts a (cart, payment instrument) pair into a persisted order, or into
//! "no order" when the payment is declined.
//!
//! ## Checkout Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       process_checkout                                  │
//! │                                                                         │
//! │  1. PRICE     price_cart(cart) ─► total (tier discount applied)        │
//! │       ├── Subtotal overflows ──► Err(Pricing)   (no calls made)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. CHARGE    gateway.charge(total, instrument)                        │
//! │       │                                                                 │
//! │       ├── Declined ──► return Ok(None)   (no save, no notify)          │
//! │       │                                                                 │
//! │       ▼ Approved                                                        │
//! │  3. SAVE      repository.save(NewOrder { cart, total, Processed })     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. NOTIFY    notifier.send(user.email, subject, "Order {id} ...")     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. RETURN    Ok(Some(order exactly as the repository returned it))    │
//! │                                                                         │
//! │  Each step is awaited before the next one starts.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is computed once. The same value goes to the gateway and into
//! the order handed to the repository, so the charged and recorded amounts
//! cannot diverge.
//!
//! No deduplication: two calls with the same cart are two charges and two
//! orders. The user's contact details are not checked; the address goes to
//! the notifier as given.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use checkout_core::{
    price_cart, Cart, ChargeOutcome, CoreResult, NewOrder, Order, PaymentInstrument, PriceBreakdown,
};

use crate::error::{CheckoutError, CheckoutResult};
use crate::ports::{NotificationService, OrderRepository, PaymentGateway};

/// Subject of the confirmation sent after a successful checkout.
pub const CONFIRMATION_SUBJECT: &str = "Your order has been approved!";

/// Body of the confirmation: the persisted order's id and total.
pub fn confirmation_body(order: &Order) -> String {
    format!("Order {} for a total of {}", order.id, order.total)
}

/// Runs checkouts against a gateway, a repository and a notifier.
///
/// Holds no per-checkout state; clone it or share it behind an `Arc` to run
/// checkouts for different carts concurrently.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    gateway: Arc<dyn PaymentGateway>,
    repository: Arc<dyn OrderRepository>,
    notifier: Arc<dyn NotificationService>,
    confirmation_subject: String,
}

impl CheckoutOrchestrator {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        repository: Arc<dyn OrderRepository>,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        CheckoutOrchestrator {
            gateway,
            repository,
            notifier,
            confirmation_subject: CONFIRMATION_SUBJECT.to_string(),
        }
    }

    /// Overrides the confirmation subject (from configuration).
    pub fn with_confirmation_subject(mut self, subject: impl Into<String>) -> Self {
        self.confirmation_subject = subject.into();
        self
    }

    pub fn confirmation_subject(&self) -> &str {
        &self.confirmation_subject
    }

    /// Quotes a cart without charging anything.
    pub fn price(&self, cart: &Cart) -> CoreResult<PriceBreakdown> {
        price_cart(cart)
    }

    /// Runs one checkout attempt.
    ///
    /// ## Returns
    /// * `Ok(Some(order))` - charged, recorded and confirmed
    /// * `Ok(None)` - payment declined; nothing was saved or sent
    /// * `Err(CheckoutError::Pricing)` - the subtotal does not fit in `Money`;
    ///   nothing was called
    /// * `Err(CheckoutError)` - a collaborator faulted; see the variant for
    ///   what had already happened
    pub async fn process_checkout(
        &self,
        cart: &Cart,
        instrument: &PaymentInstrument,
    ) -> CheckoutResult<Option<Order>> {
        let user = cart.user();
        let PriceBreakdown {
            subtotal,
            discount,
            total,
        } = price_cart(cart)?;

        debug!(
            user_id = %user.id(),
            tier = %user.tier(),
            items = cart.len(),
            subtotal = %subtotal,
            discount = %discount,
            total = %total,
            "Cart priced"
        );

        let outcome = self
            .gateway
            .charge(total, instrument)
            .await
            .map_err(CheckoutError::Gateway)?;

        if let ChargeOutcome::Declined { reason } = outcome {
            info!(
                user_id = %user.id(),
                total = %total,
                reason = reason.as_deref().unwrap_or("unspecified"),
                "Payment declined"
            );
            return Ok(None);
        }

        debug!(user_id = %user.id(), total = %total, "Payment approved");

        let order = match self.repository.save(NewOrder::processed(cart.clone(), total)).await {
            Ok(order) => order,
            Err(source) => {
                warn!(
                    user_id = %user.id(),
                    charged = %total,
                    error = %source,
                    "Order not saved after successful charge"
                );
                return Err(CheckoutError::Persistence {
                    charged: total,
                    source,
                });
            }
        };

        info!(order_id = %order.id, total = %order.total, "Order saved");

        let body = confirmation_body(&order);
        if let Err(source) = self
            .notifier
            .send(user.email(), &self.confirmation_subject, &body)
            .await
        {
            warn!(order_id = %order.id, error = %source, "Confirmation not sent");
            return Err(CheckoutError::Notification {
                order: Box::new(order),
                source,
            });
        }

        debug!(order_id = %order.id, "Confirmation sent");

        Ok(Some(order))
    }
}

impl fmt::Debug for CheckoutOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutOrchestrator")
            .field("confirmation_subject", &self.confirmation_subject)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use checkout_core::{Item, MembershipTier, Money, OrderId, OrderStatus, User};

    use super::*;
    use crate::error::CollaboratorError;
    use crate::ports::{MockNotificationService, MockOrderRepository, MockPaymentGateway};

    fn card() -> PaymentInstrument {
        PaymentInstrument::new("1234-5678-9012-3456", "123")
    }

    fn premium_cart() -> Cart {
        let user = User::new("2", "Premium Customer", "premium@example.com", MembershipTier::Premium);
        let items = vec![
            Item::new("Expensive Item 1", Money::from_major_minor(100, 0)).unwrap(),
            Item::new("Expensive Item 2", Money::from_major_minor(100, 0)).unwrap(),
        ];
        Cart::new(user, items)
    }

    fn orchestrator(
        gateway: MockPaymentGateway,
        repository: MockOrderRepository,
        notifier: MockNotificationService,
    ) -> CheckoutOrchestrator {
        CheckoutOrchestrator::new(Arc::new(gateway), Arc::new(repository), Arc::new(notifier))
    }

    #[tokio::test]
    async fn test_declined_payment_has_no_side_effects() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_charge()
            .once()
            .returning(|_, _| Ok(ChargeOutcome::declined("Payment refused")));

        let mut repository = MockOrderRepository::new();
        repository.expect_save().never();

        let mut notifier = MockNotificationService::new();
        notifier.expect_send().never();

        let result = orchestrator(gateway, repository, notifier)
            .process_checkout(&premium_cart(), &card())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_premium_checkout_charges_discounted_total() {
        let cart = premium_cart();
        let expected = NewOrder::processed(cart.clone(), Money::from_major_minor(180, 0))
            .into_order(OrderId::new(123));
        let returned = expected.clone();

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_charge()
            .once()
            .withf(|amount, instrument| {
                *amount == Money::from_major_minor(180, 0)
                    && instrument.card_number() == "1234-5678-9012-3456"
            })
            .returning(|_, _| Ok(ChargeOutcome::Approved));

        let mut repository = MockOrderRepository::new();
        repository
            .expect_save()
            .once()
            .withf(move |new_order| {
                new_order.total == Money::from_major_minor(180, 0)
                    && new_order.status == OrderStatus::Processed
                    && new_order.cart == premium_cart()
            })
            .return_once(move |_| Ok(returned));

        let mut notifier = MockNotificationService::new();
        notifier.expect_send().once().returning(|_, _, _| Ok(()));

        let order = orchestrator(gateway, repository, notifier)
            .process_checkout(&cart, &card())
            .await
            .unwrap();

        assert_eq!(order, Some(expected));
    }

    #[tokio::test]
    async fn test_confirmation_uses_persisted_id_and_total() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_charge().returning(|_, _| Ok(ChargeOutcome::Approved));

        let mut repository = MockOrderRepository::new();
        repository
            .expect_save()
            .returning(|new_order| Ok(new_order.into_order(OrderId::new(123))));

        let mut notifier = MockNotificationService::new();
        notifier
            .expect_send()
            .once()
            .withf(|address, subject, body| {
                address == "premium@example.com"
                    && subject == CONFIRMATION_SUBJECT
                    && body == "Order 123 for a total of $180.00"
            })
            .returning(|_, _, _| Ok(()));

        orchestrator(gateway, repository, notifier)
            .process_checkout(&premium_cart(), &card())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_collaborators_called_in_order() {
        let mut seq = Sequence::new();

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_charge()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(ChargeOutcome::Approved));

        let mut repository = MockOrderRepository::new();
        repository
            .expect_save()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_order| Ok(new_order.into_order(OrderId::new(1))));

        let mut notifier = MockNotificationService::new();
        notifier
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let order = orchestrator(gateway, repository, notifier)
            .process_checkout(&premium_cart(), &card())
            .await
            .unwrap();

        assert!(order.is_some());
    }

    #[tokio::test]
    async fn test_gateway_fault_propagates_without_side_effects() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_charge()
            .once()
            .returning(|_, _| Err(CollaboratorError::Unavailable("connection reset".into())));

        let mut repository = MockOrderRepository::new();
        repository.expect_save().never();

        let mut notifier = MockNotificationService::new();
        notifier.expect_send().never();

        let err = orchestrator(gateway, repository, notifier)
            .process_checkout(&premium_cart(), &card())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Gateway(CollaboratorError::Unavailable(_))));
        assert_eq!(err.charged_amount(), None);
    }

    #[tokio::test]
    async fn test_persistence_fault_reports_charged_amount() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_charge().once().returning(|_, _| Ok(ChargeOutcome::Approved));

        let mut repository = MockOrderRepository::new();
        repository
            .expect_save()
            .once()
            .returning(|_| Err(CollaboratorError::Internal("disk full".into())));

        let mut notifier = MockNotificationService::new();
        notifier.expect_send().never();

        let err = orchestrator(gateway, repository, notifier)
            .process_checkout(&premium_cart(), &card())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Persistence { .. }));
        assert_eq!(err.charged_amount(), Some(Money::from_major_minor(180, 0)));
    }

    #[tokio::test]
    async fn test_notification_fault_returns_recorded_order() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_charge().once().returning(|_, _| Ok(ChargeOutcome::Approved));

        let mut repository = MockOrderRepository::new();
        repository
            .expect_save()
            .once()
            .returning(|new_order| Ok(new_order.into_order(OrderId::new(77))));

        let mut notifier = MockNotificationService::new();
        notifier
            .expect_send()
            .once()
            .returning(|_, _, _| Err(CollaboratorError::Unavailable("smtp down".into())));

        let err = orchestrator(gateway, repository, notifier)
            .process_checkout(&premium_cart(), &card())
            .await
            .unwrap_err();

        assert_eq!(err.recorded_order().map(|order| order.id), Some(OrderId::new(77)));
    }

    #[tokio::test]
    async fn test_contact_address_is_passed_through_unchecked() {
        let user = User::new("1", "Usuario", "padrao", MembershipTier::Standard);
        let cart = Cart::empty(user);

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_charge()
            .once()
            .withf(|amount, _| amount.is_zero())
            .returning(|_, _| Ok(ChargeOutcome::Approved));

        let mut repository = MockOrderRepository::new();
        repository
            .expect_save()
            .once()
            .returning(|new_order| Ok(new_order.into_order(OrderId::new(5))));

        let mut notifier = MockNotificationService::new();
        notifier
            .expect_send()
            .once()
            .withf(|address, _, body| address == "padrao" && body == "Order 5 for a total of $0.00")
            .returning(|_, _, _| Ok(()));

        let order = orchestrator(gateway, repository, notifier)
            .process_checkout(&cart, &card())
            .await
            .unwrap();

        assert_eq!(order.map(|order| order.id), Some(OrderId::new(5)));
    }

    #[tokio::test]
    async fn test_subtotal_overflow_fails_before_charging() {
        let user = User::new("2", "Premium Customer", "premium@example.com", MembershipTier::Premium);
        let huge = Item::new("Yacht", Money::from_cents(i64::MAX / 2 + 1)).unwrap();
        let cart = Cart::new(user, vec![huge.clone(), huge]);

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_charge().never();

        let mut repository = MockOrderRepository::new();
        repository.expect_save().never();

        let mut notifier = MockNotificationService::new();
        notifier.expect_send().never();

        let err = orchestrator(gateway, repository, notifier)
            .process_checkout(&cart, &card())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::Pricing(checkout_core::CoreError::AmountOverflow { items: 2 })
        ));
        assert_eq!(err.charged_amount(), None);
    }

    #[test]
    fn test_custom_confirmation_subject() {
        let orchestrator = orchestrator(
            MockPaymentGateway::new(),
            MockOrderRepository::new(),
            MockNotificationService::new(),
        )
        .with_confirmation_subject("Thanks for your order");

        assert_eq!(orchestrator.confirmation_subject(), "Thanks for your order");
    }

    #[test]
    fn test_price_quote_has_no_side_effects() {
        let orchestrator = orchestrator(
            MockPaymentGateway::new(),
            MockOrderRepository::new(),
            MockNotificationService::new(),
        );

        let quote = orchestrator.price(&premium_cart()).unwrap();
        assert_eq!(quote.subtotal, Money::from_major_minor(200, 0));
        assert_eq!(quote.total, Money::from_major_minor(180, 0));
    }
}
