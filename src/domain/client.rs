//! Registered client and their loyalty ledger.

use chrono::NaiveDate;

use crate::domain::foundation::{require_text, validate_text, ClientId, TicketId, ValidationError};

/// A client who can buy tickets.
///
/// The loyalty ledger (`ticket_history`, `loyalty_points`) is not part of the
/// client record on disk. It is rebuilt from the ticket store on every load.
///
/// # Invariants
///
/// - `ticket_history` only grows
/// - `loyalty_points` only grows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    name: String,
    cpf: String,
    email: String,
    birthday: NaiveDate,
    loyalty_points: u32,
    ticket_history: Vec<TicketId>,
}

impl Client {
    /// Registers a client with an empty loyalty ledger.
    pub fn new(
        id: ClientId,
        name: impl Into<String>,
        cpf: impl Into<String>,
        email: impl Into<String>,
        birthday: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let client = Self {
            id,
            name: name.into(),
            cpf: cpf.into(),
            email: email.into(),
            birthday,
            loyalty_points: 0,
            ticket_history: Vec::new(),
        };
        require_text("name", &client.name)?;
        validate_text("cpf", &client.cpf)?;
        validate_text("email", &client.email)?;
        Ok(client)
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    pub fn loyalty_points(&self) -> u32 {
        self.loyalty_points
    }

    /// Tickets bought by this client, oldest first.
    pub fn ticket_history(&self) -> &[TicketId] {
        &self.ticket_history
    }

    /// Append a purchase to the ledger and credit its points.
    pub fn record_purchase(&mut self, ticket_id: TicketId, points: u32) {
        self.ticket_history.push(ticket_id);
        self.loyalty_points = self.loyalty_points.saturating_add(points);
    }
}
