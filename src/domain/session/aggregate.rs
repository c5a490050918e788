//! Session aggregate entity.
//!
//! A session is one screening of a movie in a room at a date and time, with
//! its own ticket price and seat inventory.
//!
//! # Ownership
//!
//! Sessions reference their room and movie by ID but do NOT own them.
//! The session store is the single owner of every session.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::domain::foundation::{
    DomainError, ErrorCode, MovieId, RoomId, SessionId, ValidationError,
};
use crate::domain::movie::Movie;
use crate::domain::room::Room;

/// Session aggregate - a scheduled screening with finite seats.
///
/// # Invariants
///
/// - `0 <= available_seats <= room capacity`
/// - `duration_minutes > 0`
/// - `ticket_price >= 0`
/// - `available_seats` only decreases through [`Session::take_seat`] and is
///   otherwise only rewritten by load-time reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    date: NaiveDate,
    time: NaiveTime,
    duration_minutes: u32,
    room_id: RoomId,
    movie_id: MovieId,
    ticket_price: Decimal,
    available_seats: u32,
}

impl Session {
    /// Schedule a new session with every seat of the room available.
    ///
    /// The duration is copied from the movie unless `duration_override` is given.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the price is negative
    /// - `OutOfRange` if the duration override is zero
    pub fn schedule(
        id: SessionId,
        date: NaiveDate,
        time: NaiveTime,
        room: &Room,
        movie: &Movie,
        ticket_price: Decimal,
        duration_override: Option<u32>,
    ) -> Result<Self, ValidationError> {
        if ticket_price < Decimal::ZERO {
            return Err(ValidationError::invalid_format(
                "ticket_price",
                format!("must not be negative, got {}", ticket_price),
            ));
        }
        let duration_minutes = duration_override.unwrap_or(movie.duration_minutes());
        if duration_minutes == 0 {
            return Err(ValidationError::out_of_range("duration_minutes", 1, i32::MAX, 0));
        }

        Ok(Self {
            id,
            date,
            time,
            duration_minutes,
            room_id: room.id(),
            movie_id: movie.id(),
            ticket_price,
            available_seats: room.total_seats(),
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: u32,
        room_id: RoomId,
        movie_id: MovieId,
        ticket_price: Decimal,
        available_seats: u32,
    ) -> Self {
        Self {
            id,
            date,
            time,
            duration_minutes,
            room_id,
            movie_id,
            ticket_price,
            available_seats,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn ticket_price(&self) -> Decimal {
        self.ticket_price
    }

    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    /// Seats already sold given the capacity of the session's room.
    pub fn sold_seats(&self, capacity: u32) -> u32 {
        capacity.saturating_sub(self.available_seats)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Consume exactly one seat.
    ///
    /// # Errors
    ///
    /// - `CapacityExceeded` if no seat is left; the session is not modified
    pub fn take_seat(&mut self) -> Result<(), DomainError> {
        if self.available_seats == 0 {
            return Err(DomainError::new(
                ErrorCode::CapacityExceeded,
                format!("Session {} has no available seats", self.id),
            ));
        }
        self.available_seats -= 1;
        Ok(())
    }

    /// Rewrite the seat counter as `capacity - sold`.
    ///
    /// Returns the previous counter when it disagreed with the derived value.
    pub fn reconcile_seats(&mut self, capacity: u32, sold: u32) -> Option<u32> {
        let derived = capacity.saturating_sub(sold);
        if derived == self.available_seats {
            return None;
        }
        Some(std::mem::replace(&mut self.available_seats, derived))
    }
}
