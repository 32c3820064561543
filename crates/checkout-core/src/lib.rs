//! # checkout-core: Pure Business Logic for Checkout
//!
//! This crate holds the domain model and the pricing decision of the
//! checkout workspace. It has zero I/O dependencies: no database, no network,
//! no async, no logging.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/checkout-cli                            │   │
//! │  │        load config ──► wire adapters ──► run checkout           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    checkout-service                             │   │
//! │  │   CheckoutOrchestrator: price ──► charge ──► save ──► notify    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ checkout-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ User/Cart │  │   Money   │  │ tier rule │  │   rules   │  │   │
//! │  │   │   Order   │  │ discounts │  │ breakdown │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Item, Cart, Order, PaymentInstrument)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Tier discount rule and cart price breakdown
//! - [`error`] - Domain error types
//! - [`validation`] - Price checks for deserialized carts
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{price_cart, Cart, Item, MembershipTier, Money, User};
//!
//! let user = User::new("2", "Premium Customer", "premium@example.com", MembershipTier::Premium);
//! let items = vec![
//!     Item::new("Headphones", Money::from_major_minor(100, 0)).unwrap(),
//!     Item::new("Speaker", Money::from_major_minor(100, 0)).unwrap(),
//! ];
//! let cart = Cart::new(user, items);
//!
//! // Premium members pay 90% of the subtotal
//! let breakdown = price_cart(&cart).unwrap();
//! assert_eq!(breakdown.total, Money::from_major_minor(180, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{apply_tier_discount, price_cart, PriceBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Discount granted to premium members, in basis points (1000 = 10%).
pub const PREMIUM_DISCOUNT_BPS: u32 = 1000;
