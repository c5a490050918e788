//! Ticket entity.

use rust_decimal::Decimal;

use super::PaymentMethod;
use crate::domain::foundation::{ClientId, SessionId, TicketId};

/// A sold seat for one session, bought by one client.
///
/// The `(client_id, session_id)` pair is an immutable fact. The ticket
/// references the client and session; it does not own them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: TicketId,
    client_id: ClientId,
    session_id: SessionId,
    final_price: Decimal,
    payment_method: PaymentMethod,
}

impl Ticket {
    pub fn new(
        id: TicketId,
        client_id: ClientId,
        session_id: SessionId,
        final_price: Decimal,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id,
            client_id,
            session_id,
            final_price,
            payment_method,
        }
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn final_price(&self) -> Decimal {
        self.final_price
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }
}
