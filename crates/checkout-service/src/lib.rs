//! # checkout-service: Checkout Orchestration
//!
//! Sequences one checkout: price, charge, record, confirm.
//!
//! ## Module Structure
//! ```text
//! checkout-service
//! ├── orchestrator  CheckoutOrchestrator, confirmation message
//! ├── ports         PaymentGateway, OrderRepository, NotificationService
//! ├── adapters      in-process implementations of the ports
//! ├── config        CheckoutConfig (defaults → TOML → env)
//! └── error         CollaboratorError, CheckoutError
//! ```
//!
//! ## Usage
//! ```rust
//! use std::sync::Arc;
//! use checkout_core::{Cart, Item, MembershipTier, Money, PaymentInstrument, User};
//! use checkout_service::adapters::{ApprovingGateway, InMemoryOrderRepository, TracingNotifier};
//! use checkout_service::CheckoutOrchestrator;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let orchestrator = CheckoutOrchestrator::new(
//!     Arc::new(ApprovingGateway),
//!     Arc::new(InMemoryOrderRepository::new()),
//!     Arc::new(TracingNotifier),
//! );
//!
//! let user = User::new("2", "Premium Customer", "premium@example.com", MembershipTier::Premium);
//! let cart = Cart::new(user, vec![Item::new("Item", Money::from_cents(20000)).unwrap()]);
//! let card = PaymentInstrument::new("1234-5678-9012-3456", "123");
//!
//! let order = orchestrator.process_checkout(&cart, &card).await.unwrap().unwrap();
//! assert_eq!(order.total, Money::from_cents(18000));
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod ports;

pub use config::{CheckoutConfig, ConfigError};
pub use error::{CheckoutError, CheckoutResult, CollaboratorError};
pub use orchestrator::{confirmation_body, CheckoutOrchestrator, CONFIRMATION_SUBJECT};
pub use ports::{NotificationService, OrderRepository, PaymentGateway};
