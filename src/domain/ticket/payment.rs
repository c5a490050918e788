//! Accepted payment methods.

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// How a ticket was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Pix,
}

impl PaymentMethod {
    /// Every accepted method.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Pix,
    ];

    /// Token written to the ticket file.
    pub fn token(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Pix => "PIX",
        }
    }

    /// Returns the display name for this method.
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Pix => "Pix",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    /// Accepts tokens and display names, ignoring case, padding, and
    /// `-`/space in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.token() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "payment_method",
                    format!("'{}' is not an accepted payment method", s),
                )
            })
    }
}
