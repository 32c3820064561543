//! # Reference Adapters
//!
//! In-process implementations of the collaborator traits, used by the CLI
//! and by tests that want real behavior instead of expectations.
//!
//! | Adapter                   | Trait                 | Behavior                          |
//! |---------------------------|-----------------------|-----------------------------------|
//! | `ApprovingGateway`        | `PaymentGateway`      | approves every charge             |
//! | `DecliningGateway`        | `PaymentGateway`      | declines every charge             |
//! | `InMemoryOrderRepository` | `OrderRepository`     | sequential ids starting at 1      |
//! | `TracingNotifier`         | `NotificationService` | emits the message as a log event  |

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use checkout_core::{ChargeOutcome, Money, NewOrder, Order, OrderId, PaymentInstrument};

use crate::error::CollaboratorError;
use crate::ports::{NotificationService, OrderRepository, PaymentGateway};

// =============================================================================
// Gateways
// =============================================================================

/// Approves every charge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApprovingGateway;

#[async_trait]
impl PaymentGateway for ApprovingGateway {
    async fn charge(
        &self,
        amount: Money,
        _instrument: &PaymentInstrument,
    ) -> Result<ChargeOutcome, CollaboratorError> {
        info!(amount = %amount, "Charge approved");
        Ok(ChargeOutcome::Approved)
    }
}

/// Declines every charge with a fixed reason.
#[derive(Debug, Clone)]
pub struct DecliningGateway {
    reason: String,
}

impl DecliningGateway {
    pub fn new(reason: impl Into<String>) -> Self {
        DecliningGateway {
            reason: reason.into(),
        }
    }
}

impl Default for DecliningGateway {
    fn default() -> Self {
        DecliningGateway::new("Payment refused")
    }
}

#[async_trait]
impl PaymentGateway for DecliningGateway {
    async fn charge(
        &self,
        amount: Money,
        _instrument: &PaymentInstrument,
    ) -> Result<ChargeOutcome, CollaboratorError> {
        info!(amount = %amount, reason = %self.reason, "Charge declined");
        Ok(ChargeOutcome::declined(self.reason.clone()))
    }
}

// =============================================================================
// Repository
// =============================================================================

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    orders: BTreeMap<OrderId, Order>,
}

/// Keeps orders in memory and assigns ids 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    store: Mutex<Store>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders saved so far.
    pub async fn len(&self) -> usize {
        self.store.lock().await.orders.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.orders.is_empty()
    }

    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.store.lock().await.orders.get(&id).cloned()
    }

    /// All orders in id order.
    pub async fn list(&self) -> Vec<Order> {
        self.store.lock().await.orders.values().cloned().collect()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: NewOrder) -> Result<Order, CollaboratorError> {
        let mut store = self.store.lock().await;

        store.last_id += 1;
        let order = order.into_order(OrderId::new(store.last_id));
        store.orders.insert(order.id, order.clone());

        Ok(order)
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// Writes each message as a structured `info` event instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl NotificationService for TracingNotifier {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), CollaboratorError> {
        info!(to = address, subject, body, "Notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Cart, MembershipTier, User};

    fn new_order(cents: i64) -> NewOrder {
        let user = User::new("1", "Customer", "customer@example.com", MembershipTier::Standard);
        NewOrder::processed(Cart::empty(user), Money::from_cents(cents))
    }

    fn card() -> PaymentInstrument {
        PaymentInstrument::new("1234-5678-9012-3456", "123")
    }

    #[tokio::test]
    async fn test_gateways() {
        let approved = ApprovingGateway.charge(Money::from_cents(100), &card()).await;
        assert_eq!(approved, Ok(ChargeOutcome::Approved));

        let declined = DecliningGateway::new("insufficient funds")
            .charge(Money::from_cents(100), &card())
            .await;
        assert_eq!(declined, Ok(ChargeOutcome::declined("insufficient funds")));
    }

    #[tokio::test]
    async fn test_repository_assigns_sequential_ids() {
        let repository = InMemoryOrderRepository::new();
        assert!(repository.is_empty().await);

        let first = repository.save(new_order(1000)).await.unwrap();
        let second = repository.save(new_order(2000)).await.unwrap();

        assert_eq!(first.id, OrderId::new(1));
        assert_eq!(second.id, OrderId::new(2));
        assert_eq!(repository.len().await, 2);
        assert_eq!(repository.get(OrderId::new(2)).await, Some(second));
        assert_eq!(repository.get(OrderId::new(3)).await, None);
    }

    #[tokio::test]
    async fn test_repository_keeps_identical_orders_apart() {
        let repository = InMemoryOrderRepository::new();

        repository.save(new_order(500)).await.unwrap();
        repository.save(new_order(500)).await.unwrap();

        let ids: Vec<_> = repository.list().await.into_iter().map(|o| o.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_tracing_notifier_accepts_messages() {
        let result = TracingNotifier
            .send("customer@example.com", "Subject", "Body")
            .await;
        assert!(result.is_ok());
    }
}
