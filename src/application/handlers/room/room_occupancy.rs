//! RoomOccupancyHandler - Query handler for a room's occupancy report.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::CommitGate;
use crate::domain::foundation::{DomainError, ErrorCode, MovieId, RoomId, SessionId};
use crate::domain::occupancy::{occupancy_by_movie, occupancy_by_session, room_tally, SeatTally};
use crate::domain::room::Room;
use crate::ports::{MovieRepository, RoomRepository, SessionRepository};

/// How report lines are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OccupancyGrouping {
    #[default]
    ByMovie,
    BySession,
}

#[derive(Debug, Clone)]
pub struct RoomOccupancyQuery {
    pub room_id: RoomId,
    pub grouping: OccupancyGrouping,
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyLine {
    pub movie_id: MovieId,
    /// Empty when the movie is no longer in the catalog.
    pub movie_title: String,
    /// Set only for per-session reports.
    pub session_id: Option<SessionId>,
    pub tally: SeatTally,
}

impl OccupancyLine {
    pub fn occupancy_percent(&self) -> f64 {
        self.tally.occupancy_percent()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomOccupancyReport {
    pub room: Room,
    pub lines: Vec<OccupancyLine>,
    /// All of the room's sessions together.
    pub total: SeatTally,
}

pub struct RoomOccupancyHandler {
    rooms: Arc<dyn RoomRepository>,
    movies: Arc<dyn MovieRepository>,
    sessions: Arc<dyn SessionRepository>,
    gate: CommitGate,
}

impl RoomOccupancyHandler {
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

    pub async fn handle(&self, query: RoomOccupancyQuery) -> Result<RoomOccupancyReport, DomainError> {
        let _read = self.gate.shared().await;

        let room = self.rooms.find_by_id(query.room_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::RoomNotFound,
                format!("Room not found: {}", query.room_id),
            )
        })?;
        let sessions = self.sessions.find_by_room(room.id()).await?;
        let titles: HashMap<MovieId, String> = self
            .movies
            .list_all()
            .await?
            .into_iter()
            .map(|m| (m.id(), m.title().to_string()))
            .collect();
        let title = |id: MovieId| titles.get(&id).cloned().unwrap_or_default();

        let lines = match query.grouping {
            OccupancyGrouping::ByMovie => occupancy_by_movie(&room, &sessions)
                .into_iter()
                .map(|group| OccupancyLine {
                    movie_id: group.movie_id,
                    movie_title: title(group.movie_id),
                    session_id: None,
                    tally: group.tally,
                })
                .collect(),
            OccupancyGrouping::BySession => occupancy_by_session(&room, &sessions)
                .into_iter()
                .map(|entry| OccupancyLine {
                    movie_id: entry.movie_id,
                    movie_title: title(entry.movie_id),
                    session_id: Some(entry.session_id),
                    tally: entry.tally,
                })
                .collect(),
        };

        Ok(RoomOccupancyReport {
            total: room_tally(&room, &sessions),
            room,
            lines,
        })
    }
}
