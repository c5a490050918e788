//! PurchaseTicketHandler - Command handler for selling one seat.
//!
//! A purchase moves through `Validating -> PricingComputed -> Committed`, or
//! ends in `Rejected`. Nothing is written until pricing is done, so every
//! business rejection leaves the stores untouched.
//!
//! # Commit
//!
//! The ticket write is the commit point. The client and session snapshots
//! written after it are derivable from the ticket store and are rebuilt from
//! it on every load. If one of them fails in-process, the writes already made
//! are undone (client restored, ticket removed) and the purchase fails with
//! `Persistence`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::application::CommitGate;
use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DiscountPercent, SessionId};
use crate::domain::loyalty::{DiscountPolicy, LoyaltyRules};
use crate::domain::session::Session;
use crate::domain::ticket::{PaymentMethod, PurchaseError, Ticket};
use crate::ports::{ClientRepository, SessionRepository, TicketRepository};

/// Command to buy one ticket.
#[derive(Debug, Clone)]
pub struct PurchaseTicketCommand {
    pub client_id: ClientId,
    pub session_id: SessionId,
    /// Payment method as typed by the operator.
    pub payment_method: String,
}

/// Result of a committed purchase.
#[derive(Debug, Clone)]
pub struct PurchaseTicketResult {
    pub ticket: Ticket,
    pub discount: DiscountPercent,
    pub client: Client,
    pub session: Session,
}

/// Stages of a purchase attempt, as they appear in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStage {
    Validating,
    PricingComputed,
    Committed,
    Rejected,
}

impl fmt::Display for PurchaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PurchaseStage::Validating => "validating",
            PurchaseStage::PricingComputed => "pricing_computed",
            PurchaseStage::Committed => "committed",
            PurchaseStage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Handler for ticket purchases.
pub struct PurchaseTicketHandler {
    clients: Arc<dyn ClientRepository>,
    sessions: Arc<dyn SessionRepository>,
    tickets: Arc<dyn TicketRepository>,
    policy: Arc<dyn DiscountPolicy>,
    rules: LoyaltyRules,
    gate: CommitGate,
}

impl PurchaseTicketHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        sessions: Arc<dyn SessionRepository>,
        tickets: Arc<dyn TicketRepository>,
        policy: Arc<dyn DiscountPolicy>,
        rules: LoyaltyRules,
        gate: CommitGate,
    ) -> Self {
        Self {
            clients,
            sessions,
            tickets,
            policy,
            rules,
            gate,
        }
    }

    pub async fn handle(
        &self,
        cmd: PurchaseTicketCommand,
    ) -> Result<PurchaseTicketResult, PurchaseError> {
        let _commit = self.gate.exclusive().await;

        match self.purchase(&cmd).await {
            Ok(result) => {
                tracing::info!(
                    stage = %PurchaseStage::Committed,
                    ticket_id = %result.ticket.id(),
                    client_id = %cmd.client_id,
                    session_id = %cmd.session_id,
                    final_price = %result.ticket.final_price(),
                    discount = %result.discount,
                    available_seats = result.session.available_seats(),
                    "Ticket sold"
                );
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(
                    stage = %PurchaseStage::Rejected,
                    client_id = %cmd.client_id,
                    session_id = %cmd.session_id,
                    code = %err.code(),
                    reason = %err,
                    "Purchase rejected"
                );
                Err(err)
            }
        }
    }

    async fn purchase(
        &self,
        cmd: &PurchaseTicketCommand,
    ) -> Result<PurchaseTicketResult, PurchaseError> {
        tracing::debug!(
            stage = %PurchaseStage::Validating,
            client_id = %cmd.client_id,
            session_id = %cmd.session_id,
            "Purchase stage"
        );

        // 1. Resolve client
        let client = self
            .clients
            .find_by_id(cmd.client_id)
            .await?
            .ok_or(PurchaseError::ClientNotFound(cmd.client_id))?;

        // 2. Resolve session
        let session = self
            .sessions
            .find_by_id(cmd.session_id)
            .await?
            .ok_or(PurchaseError::SessionNotFound(cmd.session_id))?;

        // 3. Check capacity
        let mut seated = session.clone();
        seated
            .take_seat()
            .map_err(|_| PurchaseError::RoomCrowded(session.id()))?;

        // 4. Parse payment method
        let payment_method = PaymentMethod::from_str(&cmd.payment_method)
            .map_err(|_| PurchaseError::PaymentInvalid(cmd.payment_method.clone()))?;

        // 5. Price
        let discount = self.policy.discount_for(&client);
        let final_price = discount.apply_to(session.ticket_price());
        tracing::debug!(
            stage = %PurchaseStage::PricingComputed,
            ticket_price = %session.ticket_price(),
            discount = %discount,
            final_price = %final_price,
            "Purchase stage"
        );

        // 6. Commit point: persist the ticket
        let ticket = Ticket::new(
            self.tickets.next_id()?,
            client.id(),
            session.id(),
            final_price,
            payment_method,
        );
        self.tickets.add(&ticket).await?;

        // 7. Credit the client
        let mut credited = client.clone();
        self.rules.credit(&mut credited, ticket.id());
        if let Err(err) = self.clients.update(&credited).await {
            self.undo(&ticket, None).await;
            return Err(err.into());
        }

        // 8. Take the seat
        if let Err(err) = self.sessions.update(&seated).await {
            self.undo(&ticket, Some(&client)).await;
            return Err(err.into());
        }

        Ok(PurchaseTicketResult {
            ticket,
            discount,
            client: credited,
            session: seated,
        })
    }

    /// Reverts the writes of a purchase that failed after its ticket was stored.
    ///
    /// A ticket that cannot be removed stays authoritative: the next load
    /// derives the seat and ledger from it.
    async fn undo(&self, ticket: &Ticket, original_client: Option<&Client>) {
        if let Some(client) = original_client {
            if let Err(e) = self.clients.update(client).await {
                tracing::error!(
                    client_id = %client.id(),
                    ticket_id = %ticket.id(),
                    error = %e,
                    "Failed to restore client after aborted purchase"
                );
            }
        }
        if let Err(e) = self.tickets.remove_by_id(ticket.id()).await {
            tracing::error!(
                ticket_id = %ticket.id(),
                error = %e,
                "Failed to remove ticket of aborted purchase"
            );
        }
    }
}
