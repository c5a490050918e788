//! Hand-written repository doubles shared by handler tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::adapters::flatfile::StoredEntity;
use crate::domain::client::Client;
use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, IdSequence, MovieId, Repository, RoomId, SessionId,
    TicketId,
};
use crate::domain::movie::Movie;
use crate::domain::room::Room;
use crate::domain::session::Session;
use crate::domain::ticket::{PaymentMethod, Ticket};
use crate::ports::{MovieRepository, SessionRepository, TicketRepository};

/// In-memory repository with switchable write failures.
pub struct MockRepo<E: StoredEntity> {
    records: Mutex<Vec<E>>,
    ids: IdSequence,
    fail_add: Mutex<bool>,
    fail_update: Mutex<bool>,
    fail_remove: Mutex<bool>,
    update_hold: Mutex<Option<Arc<Notify>>>,
    writes: Mutex<u32>,
}

impl<E: StoredEntity> MockRepo<E> {
    pub fn new() -> Self {
        Self::with(Vec::new())
    }

    pub fn with(records: Vec<E>) -> Self {
        let ids = IdSequence::new();
        for record in &records {
            ids.observe(E::raw_id(record.key()));
        }
        Self {
            records: Mutex::new(records),
            ids,
            fail_add: Mutex::new(false),
            fail_update: Mutex::new(false),
            fail_remove: Mutex::new(false),
            update_hold: Mutex::new(None),
            writes: Mutex::new(0),
        }
    }

    pub fn fail_add(&self) {
        *self.fail_add.lock().unwrap() = true;
    }

    pub fn fail_update(&self) {
        *self.fail_update.lock().unwrap() = true;
    }

    pub fn fail_remove(&self) {
        *self.fail_remove.lock().unwrap() = true;
    }

    /// Makes every `update` wait until the returned handle is notified.
    pub fn hold_updates(&self) -> Arc<Notify> {
        let release = Arc::new(Notify::new());
        *self.update_hold.lock().unwrap() = Some(release.clone());
        release
    }

    pub fn records(&self) -> Vec<E> {
        self.records.lock().unwrap().clone()
    }

    /// Successful mutations so far.
    pub fn writes(&self) -> u32 {
        *self.writes.lock().unwrap()
    }

    fn failure(&self, op: &str) -> DomainError {
        DomainError::persistence(E::FILE_NAME, format!("Simulated {} failure", op))
    }

    fn wrote(&self) {
        *self.writes.lock().unwrap() += 1;
    }
}

#[async_trait]
impl<E: StoredEntity> Repository<E, E::Id> for MockRepo<E> {
    fn next_id(&self) -> Result<E::Id, DomainError> {
        self.ids
            .allocate()
            .map(E::id_from_allocated)
            .ok_or_else(|| DomainError::new(ErrorCode::IdsExhausted, "exhausted"))
    }

    async fn reset_ids(&self) -> Result<(), DomainError> {
        self.ids.reset();
        Ok(())
    }

    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, DomainError> {
        Ok(self.records.lock().unwrap().iter().find(|r| r.key() == id).cloned())
    }

    async fn add(&self, entity: &E) -> Result<(), DomainError> {
        if *self.fail_add.lock().unwrap() {
            return Err(self.failure("add"));
        }
        self.records.lock().unwrap().push(entity.clone());
        self.wrote();
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<(), DomainError> {
        let hold = self.update_hold.lock().unwrap().clone();
        if let Some(release) = hold {
            release.notified().await;
        }
        if *self.fail_update.lock().unwrap() {
            return Err(self.failure("update"));
        }
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.key() == entity.key()) {
            Some(slot) => *slot = entity.clone(),
            None => return Err(DomainError::new(E::NOT_FOUND, "missing")),
        }
        drop(records);
        self.wrote();
        Ok(())
    }

    async fn remove_by_id(&self, id: E::Id) -> Result<bool, DomainError> {
        if *self.fail_remove.lock().unwrap() {
            return Err(self.failure("remove"));
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.key() != id);
        let removed = records.len() != before;
        drop(records);
        self.wrote();
        Ok(removed)
    }

    async fn list_all(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.records())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.records.lock().unwrap().clear();
        self.wrote();
        Ok(())
    }
}

#[async_trait]
impl MovieRepository for MockRepo<Movie> {
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, DomainError> {
        Ok(self.records().into_iter().find(|m| m.has_title(title)))
    }
}

#[async_trait]
impl SessionRepository for MockRepo<Session> {
    async fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Session>, DomainError> {
        Ok(self.records().into_iter().filter(|s| s.room_id() == room_id).collect())
    }

    async fn find_by_movie(&self, movie_id: MovieId) -> Result<Vec<Session>, DomainError> {
        Ok(self.records().into_iter().filter(|s| s.movie_id() == movie_id).collect())
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Session>, DomainError> {
        Ok(self.records().into_iter().filter(|s| s.date() == date).collect())
    }
}

#[async_trait]
impl TicketRepository for MockRepo<Ticket> {
    async fn find_by_session(&self, session_id: SessionId) -> Result<Vec<Ticket>, DomainError> {
        Ok(self.records().into_iter().filter(|t| t.session_id() == session_id).collect())
    }

    async fn find_by_client(&self, client_id: ClientId) -> Result<Vec<Ticket>, DomainError> {
        Ok(self.records().into_iter().filter(|t| t.client_id() == client_id).collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

pub fn room(id: u32, seats: u32) -> Room {
    Room::new(RoomId::try_new(id).unwrap(), seats).unwrap()
}

pub fn movie(id: u32, title: &str) -> Movie {
    Movie::new(MovieId::try_new(id).unwrap(), title, "Drama", 120, "12", "").unwrap()
}

pub fn client(id: u32) -> Client {
    Client::new(
        ClientId::try_new(id).unwrap(),
        format!("Client {}", id),
        "000.000.000-00",
        format!("client{}@example.com", id),
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
    )
    .unwrap()
}

pub fn session(id: u32, room: &Room, movie: &Movie, price: &str) -> Session {
    Session::schedule(
        SessionId::try_new(id).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 11).unwrap(),
        NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        room,
        movie,
        Decimal::from_str(price).unwrap(),
        None,
    )
    .unwrap()
}

pub fn ticket(id: u32, client: u32, session: u32) -> Ticket {
    Ticket::new(
        TicketId::try_new(id).unwrap(),
        ClientId::try_new(client).unwrap(),
        SessionId::try_new(session).unwrap(),
        Decimal::new(2000, 2),
        PaymentMethod::Cash,
    )
}
