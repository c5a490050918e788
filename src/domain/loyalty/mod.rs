//! Loyalty module - point accrual and the discount policies built on it.

mod policy;

pub use policy::{DiscountPolicy, LoyaltyTier, NoDiscount, TieredDiscountPolicy};

use crate::domain::client::Client;
use crate::domain::foundation::TicketId;

/// How purchases feed the loyalty ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoyaltyRules {
    pub points_per_ticket: u32,
}

impl LoyaltyRules {
    pub fn new(points_per_ticket: u32) -> Self {
        Self { points_per_ticket }
    }

    /// Credit one purchase to the client's ledger.
    pub fn credit(&self, client: &mut Client, ticket_id: TicketId) {
        client.record_purchase(ticket_id, self.points_per_ticket);
    }
}

impl Default for LoyaltyRules {
    fn default() -> Self {
        Self::new(1)
    }
}
