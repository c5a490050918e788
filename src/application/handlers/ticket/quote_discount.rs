//! QuoteDiscountHandler - Query handler for the price a client would pay.
//!
//! Lets the operator show the discount before confirming a sale. Nothing is
//! written.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::CommitGate;
use crate::domain::foundation::{ClientId, DiscountPercent, SessionId};
use crate::domain::loyalty::DiscountPolicy;
use crate::domain::ticket::PurchaseError;
use crate::ports::{ClientRepository, SessionRepository};

/// Query for a client's current price on a session.
#[derive(Debug, Clone)]
pub struct QuoteDiscountQuery {
    pub client_id: ClientId,
    pub session_id: SessionId,
}

/// What the client would pay right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountQuote {
    pub loyalty_points: u32,
    pub discount: DiscountPercent,
    pub ticket_price: Decimal,
    pub final_price: Decimal,
    pub available_seats: u32,
}

pub struct QuoteDiscountHandler {
    clients: Arc<dyn ClientRepository>,
    sessions: Arc<dyn SessionRepository>,
    policy: Arc<dyn DiscountPolicy>,
    gate: CommitGate,
}

impl QuoteDiscountHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        sessions: Arc<dyn SessionRepository>,
        policy: Arc<dyn DiscountPolicy>,
        gate: CommitGate,
    ) -> Self {
        Self {
            clients,
            sessions,
            policy,
            gate,
        }
    }

    pub async fn handle(&self, query: QuoteDiscountQuery) -> Result<DiscountQuote, PurchaseError> {
        let _read = self.gate.shared().await;

        let client = self
            .clients
            .find_by_id(query.client_id)
            .await?
            .ok_or(PurchaseError::ClientNotFound(query.client_id))?;
        let session = self
            .sessions
            .find_by_id(query.session_id)
            .await?
            .ok_or(PurchaseError::SessionNotFound(query.session_id))?;

        let discount = self.policy.discount_for(&client);
        Ok(DiscountQuote {
            loyalty_points: client.loyalty_points(),
            discount,
            ticket_price: session.ticket_price(),
            final_price: discount.apply_to(session.ticket_price()),
            available_seats: session.available_seats(),
        })
    }
}
