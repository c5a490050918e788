//! ScheduleSessionHandler - Command handler for putting a movie on screen.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::application::CommitGate;
use crate::domain::foundation::{DomainError, ErrorCode, MovieId, RoomId};
use crate::domain::session::Session;
use crate::ports::{MovieRepository, RoomRepository, SessionRepository};

/// Command to schedule a screening.
#[derive(Debug, Clone)]
pub struct ScheduleSessionCommand {
    pub room_id: RoomId,
    pub movie_id: MovieId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub ticket_price: Decimal,
    /// Replaces the movie's running time, e.g. for a cut with trailers.
    ///
    /// Lives in memory only. The session line has no duration field, so a
    /// reload gives the session its movie's running time again.
    pub duration_override: Option<u32>,
}

/// Result of successful scheduling.
#[derive(Debug, Clone)]
pub struct ScheduleSessionResult {
    pub session: Session,
}

/// Handler for scheduling sessions.
pub struct ScheduleSessionHandler {
    rooms: Arc<dyn RoomRepository>,
    movies: Arc<dyn MovieRepository>,
    sessions: Arc<dyn SessionRepository>,
    gate: CommitGate,
}

impl ScheduleSessionHandler {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        movies: Arc<dyn MovieRepository>,
        sessions: Arc<dyn SessionRepository>,
        gate: CommitGate,
    ) -> Self {
        Self {
            rooms,
            movies,
            sessions,
            gate,
        }
    }

    pub async fn handle(
        &self,
        cmd: ScheduleSessionCommand,
    ) -> Result<ScheduleSessionResult, DomainError> {
        let _commit = self.gate.exclusive().await;

        let room = self.rooms.find_by_id(cmd.room_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::RoomNotFound, format!("Room not found: {}", cmd.room_id))
        })?;
        let movie = self.movies.find_by_id(cmd.movie_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::MovieNotFound,
                format!("Movie not found: {}", cmd.movie_id),
            )
        })?;

        let session = Session::schedule(
            self.sessions.next_id()?,
            cmd.date,
            cmd.time,
            &room,
            &movie,
            cmd.ticket_price,
            cmd.duration_override,
        )?;
        self.sessions.add(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            room_id = %room.id(),
            movie_id = %movie.id(),
            date = %session.date(),
            time = %session.time(),
            "Session scheduled"
        );

        Ok(ScheduleSessionResult { session })
    }
}
