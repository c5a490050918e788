//! RemoveClientHandler - Command handler for deleting a client with no tickets.
//!
//! Tickets whose client is gone are dropped on the next load and their seats
//! released, so a client who ever bought a ticket is kept.

use std::sync::Arc;

use crate::application::CommitGate;
use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DomainError, ErrorCode};
use crate::ports::{ClientRepository, TicketRepository};

/// Command to remove a client.
#[derive(Debug, Clone)]
pub struct RemoveClientCommand {
    pub client_id: ClientId,
}

/// Result of a successful removal.
#[derive(Debug, Clone)]
pub struct RemoveClientResult {
    pub client: Client,
}

pub struct RemoveClientHandler {
    clients: Arc<dyn ClientRepository>,
    tickets: Arc<dyn TicketRepository>,
    gate: CommitGate,
}

impl RemoveClientHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        tickets: Arc<dyn TicketRepository>,
        gate: CommitGate,
    ) -> Self {
        Self {
            clients,
            tickets,
            gate,
        }
    }

    pub async fn handle(&self, cmd: RemoveClientCommand) -> Result<RemoveClientResult, DomainError> {
        let _commit = self.gate.exclusive().await;

        let client = self.clients.find_by_id(cmd.client_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::ClientNotFound,
                format!("Client not found: {}", cmd.client_id),
            )
        })?;

        let bought = self.tickets.find_by_client(client.id()).await?.len();
        if bought > 0 {
            return Err(DomainError::new(
                ErrorCode::InvalidState,
                format!("Client {} holds {} tickets", client.id(), bought),
            )
            .with_detail("tickets", bought.to_string()));
        }

        self.clients.remove_by_id(client.id()).await?;
        tracing::info!(client_id = %client.id(), "Client removed");

        Ok(RemoveClientResult { client })
    }
}
