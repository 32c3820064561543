//! # Domain Types
//!
//! Passive data holders consumed and produced by the checkout orchestrator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Cart       │   │      Item       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  user           │   │  name           │       │
//! │  │  name           │   │  items ─────────┼──►│  unit_price     │       │
//! │  │  email          │   └────────┬────────┘   └─────────────────┘       │
//! │  │  tier           │            │                                       │
//! │  └─────────────────┘            ▼                                       │
//! │                        ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │    NewOrder     │   │      Order      │       │
//! │                        │  ─────────────  │──►│  ─────────────  │       │
//! │                        │  cart           │   │  id (assigned)  │       │
//! │                        │  total          │   │  cart           │       │
//! │                        │  status         │   │  total, status  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                         handed to the         returned by the          │
//! │                         repository            repository               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! An order has no identifier until the repository persists it. The two
//! shapes are separate types so "an order without an id" cannot be returned
//! from a checkout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation;

// =============================================================================
// Membership Tier
// =============================================================================

/// Classification of a user that determines discount eligibility.
///
/// The discount each tier earns lives in [`crate::pricing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    /// Regular customer, pays the full subtotal.
    #[default]
    Standard,
    /// Premium member, eligible for the premium discount.
    Premium,
}

impl MembershipTier {
    /// All known tiers, in declaration order.
    pub const ALL: [MembershipTier; 2] = [MembershipTier::Standard, MembershipTier::Premium];

    /// Returns the lowercase name used in config and cart files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Standard => "standard",
            MembershipTier::Premium => "premium",
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(MembershipTier::Standard),
            "premium" => Ok(MembershipTier::Premium),
            _ => Err(ValidationError::NotAllowed {
                field: "tier".to_string(),
                allowed: MembershipTier::ALL
                    .iter()
                    .map(|tier| tier.as_str().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// The customer who owns a cart. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    name: String,
    /// Contact address the confirmation is sent to.
    email: String,
    #[serde(default)]
    tier: MembershipTier,
}

impl User {
    /// Creates a user. The contact address is passed to the notifier as
    /// given.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        tier: MembershipTier,
    ) -> Self {
        User {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            tier,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn tier(&self) -> MembershipTier {
        self.tier
    }
}

// =============================================================================
// Item
// =============================================================================

/// A line in the cart: display name and unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    unit_price: Money,
}

impl Item {
    /// Creates an item, rejecting negative prices.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{Item, Money};
    ///
    /// assert!(Item::new("Keyboard", Money::from_cents(4999)).is_ok());
    /// assert!(Item::new("Refund", Money::from_cents(-100)).is_err());
    /// ```
    pub fn new(name: impl Into<String>, unit_price: Money) -> Result<Self, ValidationError> {
        let item = Item {
            name: name.into(),
            unit_price,
        };
        validation::validate_item(&item)?;
        Ok(item)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A user's cart. Item order is kept but irrelevant for totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    user: User,
    #[serde(default)]
    items: Vec<Item>,
}

impl Cart {
    /// Creates a cart. Any number of items is allowed, and an empty item
    /// list costs nothing.
    pub fn new(user: User, items: Vec<Item>) -> Self {
        Cart { user, items }
    }

    /// Creates a cart with no items.
    pub fn empty(user: User) -> Self {
        Cart {
            user,
            items: Vec::new(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all unit prices. Zero for an empty cart.
    ///
    /// Fails with [`CoreError::AmountOverflow`] when the sum does not fit in
    /// a `Money`.
    pub fn subtotal(&self) -> CoreResult<Money> {
        Money::checked_sum(self.items.iter().map(Item::unit_price))
            .ok_or(CoreError::AmountOverflow { items: self.len() })
    }
}

// =============================================================================
// Payment Instrument
// =============================================================================

/// Card credentials passed through to the gateway untouched.
///
/// The checkout never inspects or validates these fields. `Debug` redacts
/// them so they cannot leak through log lines.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentInstrument {
    card_number: String,
    security_code: String,
}

impl PaymentInstrument {
    pub fn new(card_number: impl Into<String>, security_code: impl Into<String>) -> Self {
        PaymentInstrument {
            card_number: card_number.into(),
            security_code: security_code.into(),
        }
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn security_code(&self) -> &str {
        &self.security_code
    }
}

impl fmt::Debug for PaymentInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInstrument")
            .field("card_number", &"<redacted>")
            .field("security_code", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Charge Outcome
// =============================================================================

/// The gateway's answer to a charge request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChargeOutcome {
    /// Funds were authorized for the requested amount.
    Approved,
    /// The charge was refused. `reason` is whatever the gateway reported.
    Declined { reason: Option<String> },
}

impl ChargeOutcome {
    /// Creates a declined outcome with a reason.
    pub fn declined(reason: impl Into<String>) -> Self {
        ChargeOutcome::Declined {
            reason: Some(reason.into()),
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ChargeOutcome::Approved)
    }
}

// =============================================================================
// Orders
// =============================================================================

/// The status of an order produced by a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Payment authorized and order recorded.
    #[default]
    Processed,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processed => "processed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processed" => Ok(OrderStatus::Processed),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec!["processed".to_string()],
            }),
        }
    }
}

/// Identifier assigned to an order by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    pub const fn new(id: i64) -> Self {
        OrderId(id)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order that has been paid for but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub cart: Cart,
    /// The amount that was charged. Never the undiscounted subtotal.
    pub total: Money,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Creates a processed order for the given cart and charged total.
    pub fn processed(cart: Cart, total: Money) -> Self {
        NewOrder {
            cart,
            total,
            status: OrderStatus::Processed,
        }
    }

    /// Attaches the identifier a repository assigned.
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            cart: self.cart,
            total: self.total,
            status: self.status,
        }
    }
}

/// A persisted order, as returned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub cart: Cart,
    pub total: Money,
    pub status: OrderStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================
