//! CatalogReader - read surface of the box office for presentation.
//!
//! Every query takes the [`CommitGate`] shared, so a caller reading the
//! ticket and session stores one after the other never lands between the
//! ticket write of a purchase and its seat write.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::CommitGate;
use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DomainError, MovieId, RoomId, SessionId};
use crate::domain::movie::Movie;
use crate::domain::room::Room;
use crate::domain::session::Session;
use crate::domain::ticket::Ticket;
use crate::ports::{
    ClientRepository, MovieRepository, RoomRepository, SessionRepository, TicketRepository,
};

/// A session together with the tickets sold for it, read in one commit window.
#[derive(Debug, Clone)]
pub struct SeatSnapshot {
    pub session: Session,
    pub tickets_sold: u32,
}

pub struct CatalogReader {
    movies: Arc<dyn MovieRepository>,
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
    clients: Arc<dyn ClientRepository>,
    tickets: Arc<dyn TicketRepository>,
    gate: CommitGate,
}

impl CatalogReader {
    pub fn new(
        movies: Arc<dyn MovieRepository>,
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionRepository>,
        clients: Arc<dyn ClientRepository>,
        tickets: Arc<dyn TicketRepository>,
        gate: CommitGate,
    ) -> Self {
        Self {
            movies,
            rooms,
            sessions,
            clients,
            tickets,
            gate,
        }
    }

    pub async fn movies(&self) -> Result<Vec<Movie>, DomainError> {
        let _read = self.gate.shared().await;
        self.movies.list_all().await
    }

    pub async fn movie(&self, id: MovieId) -> Result<Option<Movie>, DomainError> {
        let _read = self.gate.shared().await;
        self.movies.find_by_id(id).await
    }

    /// First movie whose title matches, ignoring case.
    pub async fn movie_by_title(&self, title: &str) -> Result<Option<Movie>, DomainError> {
        let _read = self.gate.shared().await;
        self.movies.find_by_title(title).await
    }

    pub async fn rooms(&self) -> Result<Vec<Room>, DomainError> {
        let _read = self.gate.shared().await;
        self.rooms.list_all().await
    }

    pub async fn room(&self, id: RoomId) -> Result<Option<Room>, DomainError> {
        let _read = self.gate.shared().await;
        self.rooms.find_by_id(id).await
    }

    pub async fn sessions(&self) -> Result<Vec<Session>, DomainError> {
        let _read = self.gate.shared().await;
        self.sessions.list_all().await
    }

    pub async fn session(&self, id: SessionId) -> Result<Option<Session>, DomainError> {
        let _read = self.gate.shared().await;
        self.sessions.find_by_id(id).await
    }

    pub async fn sessions_in_room(&self, room_id: RoomId) -> Result<Vec<Session>, DomainError> {
        let _read = self.gate.shared().await;
        self.sessions.find_by_room(room_id).await
    }

    pub async fn sessions_of_movie(&self, movie_id: MovieId) -> Result<Vec<Session>, DomainError> {
        let _read = self.gate.shared().await;
        self.sessions.find_by_movie(movie_id).await
    }

    pub async fn sessions_on(&self, date: NaiveDate) -> Result<Vec<Session>, DomainError> {
        let _read = self.gate.shared().await;
        self.sessions.find_by_date(date).await
    }

    pub async fn clients(&self) -> Result<Vec<Client>, DomainError> {
        let _read = self.gate.shared().await;
        self.clients.list_all().await
    }

    pub async fn client(&self, id: ClientId) -> Result<Option<Client>, DomainError> {
        let _read = self.gate.shared().await;
        self.clients.find_by_id(id).await
    }

    pub async fn tickets_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<Ticket>, DomainError> {
        let _read = self.gate.shared().await;
        self.tickets.find_by_session(session_id).await
    }

    pub async fn tickets_for_client(&self, client_id: ClientId) -> Result<Vec<Ticket>, DomainError> {
        let _read = self.gate.shared().await;
        self.tickets.find_by_client(client_id).await
    }

    /// Reads a session and its ticket count under a single gate hold.
    ///
    /// Returns `Ok(None)` if the session doesn't exist.
    pub async fn seat_snapshot(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SeatSnapshot>, DomainError> {
        let _read = self.gate.shared().await;
        let Some(session) = self.sessions.find_by_id(session_id).await? else {
            return Ok(None);
        };
        let tickets_sold = self.tickets.count_by_session(session_id).await?;
        Ok(Some(SeatSnapshot {
            session,
            tickets_sold,
        }))
    }
}
