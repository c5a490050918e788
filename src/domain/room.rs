//! Screening room.
//!
//! A room does not hold its sessions. The sessions scheduled in a room are a
//! query over the session store (`SessionRepository::find_by_room`).

use crate::domain::foundation::{RoomId, ValidationError};

/// A room with a fixed seat capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    total_seats: u32,
}

impl Room {
    /// Creates a room. Capacity must be positive.
    pub fn new(id: RoomId, total_seats: u32) -> Result<Self, ValidationError> {
        if total_seats == 0 {
            return Err(ValidationError::out_of_range("total_seats", 1, i32::MAX, 0));
        }
        Ok(Self { id, total_seats })
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }
}
