//! Discount policies.
//!
//! A policy is a pure function of the client's loyalty state. The purchase
//! handler receives it as a trait object, so tiers can be swapped without
//! touching the purchase workflow.

use crate::domain::client::Client;
use crate::domain::foundation::{DiscountPercent, ValidationError};

/// Maps a client's loyalty state to a discount in `[0, 100)`.
///
/// Implementations must be monotonic: a client with more loyalty points
/// never gets a smaller discount.
pub trait DiscountPolicy: Send + Sync {
    fn discount_for(&self, client: &Client) -> DiscountPercent;
}

/// Policy that never discounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscount;

impl DiscountPolicy for NoDiscount {
    fn discount_for(&self, _client: &Client) -> DiscountPercent {
        DiscountPercent::ZERO
    }
}

/// A loyalty threshold and the discount it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoyaltyTier {
    pub min_points: u32,
    pub discount: DiscountPercent,
}

impl LoyaltyTier {
    pub fn new(min_points: u32, discount: DiscountPercent) -> Self {
        Self {
            min_points,
            discount,
        }
    }
}

/// Picks the discount of the highest tier the client has reached.
#[derive(Debug, Clone, Default)]
pub struct TieredDiscountPolicy {
    tiers: Vec<LoyaltyTier>,
}

impl TieredDiscountPolicy {
    /// Builds the policy, ordering tiers by threshold.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if two tiers share a threshold, or a higher threshold
    ///   unlocks a smaller discount
    pub fn new(mut tiers: Vec<LoyaltyTier>) -> Result<Self, ValidationError> {
        tiers.sort_by_key(|tier| tier.min_points);
        for pair in tiers.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if lower.min_points == upper.min_points {
                return Err(ValidationError::invalid_format(
                    "loyalty.tiers",
                    format!("duplicate threshold {}", upper.min_points),
                ));
            }
            if upper.discount < lower.discount {
                return Err(ValidationError::invalid_format(
                    "loyalty.tiers",
                    format!(
                        "tier at {} points gives {} but tier at {} points gives {}",
                        upper.min_points, upper.discount, lower.min_points, lower.discount
                    ),
                ));
            }
        }
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[LoyaltyTier] {
        &self.tiers
    }
}

impl DiscountPolicy for TieredDiscountPolicy {
    fn discount_for(&self, client: &Client) -> DiscountPercent {
        self.tiers
            .iter()
            .rev()
            .find(|tier| client.loyalty_points() >= tier.min_points)
            .map(|tier| tier.discount)
            .unwrap_or(DiscountPercent::ZERO)
    }
}
