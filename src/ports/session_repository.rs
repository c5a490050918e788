//! Session repository port.
//!
//! Defines the contract for persisting and retrieving scheduled sessions.
//!
//! # Design
//!
//! - **Single owner**: the session store is the only owner of sessions
//! - **Room view**: a room's sessions are a query here, not a list on the room
//! - **Replace-by-id**: `update` persists the full session snapshot

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, MovieId, Repository, RoomId, SessionId};
use crate::domain::session::Session;

/// Repository port for Session persistence.
#[async_trait]
pub trait SessionRepository: Repository<Session, SessionId> {
    /// Sessions scheduled in a room, in insertion order.
    async fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Session>, DomainError>;

    /// Sessions screening a movie, in insertion order.
    async fn find_by_movie(&self, movie_id: MovieId) -> Result<Vec<Session>, DomainError>;

    /// Sessions scheduled on a date, in insertion order.
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Session>, DomainError>;
}
