//! Ticket repository port.
//!
//! The ticket store is the source of truth for seat consumption and loyalty:
//! session seat counters and client ledgers are derived from it on load.

use async_trait::async_trait;

use crate::domain::foundation::{ClientId, DomainError, Repository, SessionId, TicketId};
use crate::domain::ticket::Ticket;

/// Repository port for sold tickets.
#[async_trait]
pub trait TicketRepository: Repository<Ticket, TicketId> {
    /// Tickets sold for a session, in insertion order.
    async fn find_by_session(&self, session_id: SessionId) -> Result<Vec<Ticket>, DomainError>;

    /// Tickets bought by a client, in insertion order.
    async fn find_by_client(&self, client_id: ClientId) -> Result<Vec<Ticket>, DomainError>;

    /// Number of tickets sold for a session.
    async fn count_by_session(&self, session_id: SessionId) -> Result<u32, DomainError> {
        Ok(self.find_by_session(session_id).await?.len() as u32)
    }
}
