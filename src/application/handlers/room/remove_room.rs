//! RemoveRoomHandler - Command handler for deleting a room with no sessions.

use std::sync::Arc;

use crate::application::CommitGate;
use crate::domain::foundation::{DomainError, ErrorCode, RoomId};
use crate::domain::room::Room;
use crate::ports::{RoomRepository, SessionRepository};

/// Command to remove a room.
#[derive(Debug, Clone)]
pub struct RemoveRoomCommand {
    pub room_id: RoomId,
}

/// Result of a successful removal.
#[derive(Debug, Clone)]
pub struct RemoveRoomResult {
    pub room: Room,
}

pub struct RemoveRoomHandler {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
    gate: CommitGate,
}

impl RemoveRoomHandler {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionRepository>,
        gate: CommitGate,
    ) -> Self {
        Self {
            rooms,
            sessions,
            gate,
        }
    }

    /// Removes the room once every session in it has been cancelled.
    ///
    /// # Errors
    ///
    /// - `RoomNotFound` if the room doesn't exist
    /// - `InvalidState` if sessions are still scheduled in the room
    pub async fn handle(&self, cmd: RemoveRoomCommand) -> Result<RemoveRoomResult, DomainError> {
        let _commit = self.gate.exclusive().await;

        let room = self.rooms.find_by_id(cmd.room_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::RoomNotFound, format!("Room not found: {}", cmd.room_id))
        })?;

        let scheduled = self.sessions.find_by_room(room.id()).await?.len();
        if scheduled > 0 {
            return Err(DomainError::new(
                ErrorCode::InvalidState,
                format!("Room {} still has {} sessions", room.id(), scheduled),
            )
            .with_detail("sessions", scheduled.to_string()));
        }

        self.rooms.remove_by_id(room.id()).await?;
        tracing::info!(room_id = %room.id(), "Room removed");

        Ok(RemoveRoomResult { room })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{movie, room, session, MockRepo};

    fn setup() -> (Arc<MockRepo<Room>>, RemoveRoomHandler) {
        let busy = room(1, 10);
        let idle = room(2, 10);
        let m = movie(1, "Alien");
        let rooms = Arc::new(MockRepo::with(vec![busy.clone(), idle]));
        let handler = RemoveRoomHandler::new(
            rooms.clone(),
            Arc::new(MockRepo::with(vec![session(1, &busy, &m, "20.00")])),
            CommitGate::new(),
        );
        (rooms, handler)
    }

    fn remove(id: u32) -> RemoveRoomCommand {
        RemoveRoomCommand {
            room_id: RoomId::try_new(id).unwrap(),
        }
    }

    #[tokio::test]
    async fn removes_a_room_without_sessions() {
        let (rooms, handler) = setup();

        handler.handle(remove(2)).await.unwrap();

        let left: Vec<u32> = rooms.records().iter().map(|r| r.id().value()).collect();
        assert_eq!(left, vec![1]);
    }

    #[tokio::test]
    async fn refuses_to_remove_a_room_with_sessions() {
        let (rooms, handler) = setup();

        let err = handler.handle(remove(1)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(rooms.records().len(), 2);
        assert_eq!(rooms.writes(), 0);
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let (_, handler) = setup();
        let err = handler.handle(remove(5)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomNotFound);
    }
}
