//! # Collaborator Contracts
//!
//! The three capabilities a checkout depends on. Each trait has exactly one
//! operation; any implementation is substitutable (real gateways, the SQLite
//! repository in `checkout-db`, the adapters in [`crate::adapters`], test
//! doubles).
//!
//! ```text
//! CheckoutOrchestrator
//!   ├── Arc<dyn PaymentGateway>       charge(amount, instrument)
//!   ├── Arc<dyn OrderRepository>      save(new_order) → Order (assigns id)
//!   └── Arc<dyn NotificationService>  send(address, subject, body)
//! ```
//!
//! Cancellation and timeouts are the implementation's business.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use checkout_core::{ChargeOutcome, Money, NewOrder, Order, PaymentInstrument};

use crate::error::CollaboratorError;

/// Authorizes payments.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges `amount` to `instrument`.
    ///
    /// A refused charge is `Ok(ChargeOutcome::Declined { .. })`; `Err` is
    /// reserved for faults (unreachable, internal failure).
    async fn charge(
        &self,
        amount: Money,
        instrument: &PaymentInstrument,
    ) -> Result<ChargeOutcome, CollaboratorError>;
}

/// Persists orders and assigns their identifiers.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores `order` and returns the authoritative copy, id included.
    async fn save(&self, order: NewOrder) -> Result<Order, CollaboratorError>;
}

/// Delivers messages to a contact address.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), CollaboratorError>;
}
