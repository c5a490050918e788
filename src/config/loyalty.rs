//! Loyalty configuration
//!
//! Tier values are business decisions. With no tiers configured nobody gets
//! a discount.
//!
//! ```toml
//! [loyalty]
//! points_per_ticket = 1
//! tiers = [
//!     { min_points = 10, discount_percent = 5 },
//!     { min_points = 25, discount_percent = 10 },
//! ]
//! ```

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::DiscountPercent;
use crate::domain::loyalty::{LoyaltyRules, LoyaltyTier, TieredDiscountPolicy};

#[derive(Debug, Clone, Deserialize)]
pub struct LoyaltyConfig {
    /// Points credited per ticket bought
    #[serde(default = "default_points_per_ticket")]
    pub points_per_ticket: u32,

    #[serde(default)]
    pub tiers: Vec<TierConfig>,
}

/// One discount tier
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct TierConfig {
    pub min_points: u32,
    pub discount_percent: u8,
}

impl LoyaltyConfig {
    pub fn rules(&self) -> LoyaltyRules {
        LoyaltyRules::new(self.points_per_ticket)
    }

    /// Builds the discount policy from the configured tiers.
    pub fn policy(&self) -> Result<TieredDiscountPolicy, ValidationError> {
        let mut tiers = Vec::with_capacity(self.tiers.len());
        for tier in &self.tiers {
            let discount = DiscountPercent::try_new(tier.discount_percent).map_err(|_| {
                ValidationError::InvalidTierDiscount {
                    min_points: tier.min_points,
                    discount: tier.discount_percent,
                }
            })?;
            tiers.push(LoyaltyTier::new(tier.min_points, discount));
        }
        TieredDiscountPolicy::new(tiers)
            .map_err(|e| ValidationError::NonMonotonicTiers(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.points_per_ticket == 0 {
            return Err(ValidationError::InvalidPointsPerTicket);
        }
        self.policy().map(|_| ())
    }
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            points_per_ticket: default_points_per_ticket(),
            tiers: Vec::new(),
        }
    }
}

fn default_points_per_ticket() -> u32 {
    1
}
