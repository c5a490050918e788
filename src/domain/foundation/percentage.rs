//! Discount percentage value object (0-99 scale).

use rust_decimal::Decimal;
use std::fmt;

use super::ValidationError;

/// A price reduction in whole percent, always below 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    /// No discount.
    pub const ZERO: Self = Self(0);

    /// Largest representable discount.
    pub const MAX: Self = Self(99);

    /// Creates a DiscountPercent, returning error if 100 or above.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX.0 {
            return Err(ValidationError::out_of_range(
                "discount_percent",
                0,
                i32::from(Self::MAX.0),
                i32::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Applies the discount: `price × (1 − value/100)`, exact.
    ///
    /// The result keeps at least the price's scale, so `20.00` stays `20.00`.
    pub fn apply_to(&self, price: Decimal) -> Decimal {
        let factor = Decimal::ONE - Decimal::new(i64::from(self.0), 2);
        let mut discounted = (price * factor).normalize();
        if discounted.scale() < price.scale() {
            discounted.rescale(price.scale());
        }
        discounted
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
