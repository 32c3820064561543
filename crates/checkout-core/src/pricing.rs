//! # Pricing Module
//!
//! The single pricing decision of a checkout: how much a cart costs once the
//! owner's membership tier is taken into account.
//!
//! ## Pricing Flow
//! ```text
//! Cart.items ──► subtotal = Σ unit_price   (checked: AmountOverflow)
//!                    │
//!                    ▼
//!   apply_tier_discount(subtotal, tier) ← pure, no cart needed
//!                    │
//!       Standard ────┼──── Premium
//!       (0 bps)      │     (1000 bps)
//!        total =     │      total = subtotal − 10% (half-up, in cents)
//!        subtotal    ▼
//!              PriceBreakdown { subtotal, discount, total }
//! ```
//!
//! ## Rounding
//! The discount is rounded half up to whole cents and then subtracted:
//! `total = subtotal - round_half_up(subtotal × bps / 10000)`. A premium
//! subtotal of 5¢ has a 0.5¢ discount that rounds to 1¢, so it costs 4¢
//! rather than 4.5¢. $9.99 costs $8.99.
//!
//! Only the two-tier rule exists. Adding a tier means adding a match arm in
//! [`tier_discount_bps`]; the orchestrator never changes.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Cart, MembershipTier};
use crate::PREMIUM_DISCOUNT_BPS;

/// Discount a tier earns, in basis points.
pub const fn tier_discount_bps(tier: MembershipTier) -> u32 {
    match tier {
        MembershipTier::Standard => 0,
        MembershipTier::Premium => PREMIUM_DISCOUNT_BPS,
    }
}

/// Returns the payable total for a subtotal owned by a user of `tier`.
///
/// The discount is rounded half up before it is subtracted, so the customer
/// never pays a fraction of a cent.
///
/// ## Example
/// ```rust
/// use checkout_core::{apply_tier_discount, MembershipTier, Money};
///
/// let subtotal = Money::from_major_minor(200, 0);
/// assert_eq!(apply_tier_discount(subtotal, MembershipTier::Premium), Money::from_major_minor(180, 0));
/// assert_eq!(apply_tier_discount(subtotal, MembershipTier::Standard), subtotal);
///
/// // 10% of 5¢ is 0.5¢, rounded up to 1¢
/// assert_eq!(apply_tier_discount(Money::from_cents(5), MembershipTier::Premium), Money::from_cents(4));
/// ```
pub fn apply_tier_discount(subtotal: Money, tier: MembershipTier) -> Money {
    subtotal.apply_percentage_discount(tier_discount_bps(tier))
}

/// Itemized result of pricing a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Sum of unit prices.
    pub subtotal: Money,
    /// Amount taken off by the tier rule.
    pub discount: Money,
    /// What the customer is charged.
    pub total: Money,
}

/// Prices a cart: subtotal, tier discount and final total.
///
/// `total == subtotal - discount` always holds. An empty cart prices to zero
/// for every tier. A subtotal too large for `Money` is reported as
/// [`crate::CoreError::AmountOverflow`].
pub fn price_cart(cart: &Cart) -> CoreResult<PriceBreakdown> {
    let subtotal = cart.subtotal()?;
    let total = apply_tier_discount(subtotal, cart.user().tier());

    Ok(PriceBreakdown {
        subtotal,
        discount: subtotal - total,
        total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
