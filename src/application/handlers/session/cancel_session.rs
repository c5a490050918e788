//! CancelSessionHandler - Command handler for removing an unsold session.
//!
//! Sessions with sold tickets cannot be cancelled here; there is no refund
//! flow to release their seats.

use std::sync::Arc;

use crate::application::CommitGate;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::Session;
use crate::ports::{SessionRepository, TicketRepository};

/// Command to cancel a session.
#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelSessionResult {
    pub session: Session,
}

pub struct CancelSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    tickets: Arc<dyn TicketRepository>,
    gate: CommitGate,
}

impl CancelSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        tickets: Arc<dyn TicketRepository>,
        gate: CommitGate,
    ) -> Self {
        Self {
            sessions,
            tickets,
            gate,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelSessionCommand,
    ) -> Result<CancelSessionResult, DomainError> {
        let _commit = self.gate.exclusive().await;

        let session = self.sessions.find_by_id(cmd.session_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", cmd.session_id),
            )
        })?;

        let sold = self.tickets.count_by_session(session.id()).await?;
        if sold > 0 {
            return Err(DomainError::new(
                ErrorCode::InvalidState,
                format!("Session {} has {} sold tickets", session.id(), sold),
            )
            .with_detail("sold", sold.to_string()));
        }

        self.sessions.remove_by_id(session.id()).await?;
        tracing::info!(session_id = %session.id(), "Session cancelled");

        Ok(CancelSessionResult { session })
    }
}
