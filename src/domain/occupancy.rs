//! Occupancy aggregation over the sessions of one room.
//!
//! Pure, read-only. `sold = capacity - available` per session, and a group's
//! occupancy is `sold / (session_count × capacity) × 100`. An empty group
//! reports 0%.

use crate::domain::foundation::{MovieId, SessionId};
use crate::domain::room::Room;
use crate::domain::session::Session;

/// Seat totals for a group of sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeatTally {
    pub session_count: u32,
    pub sold_seats: u64,
    pub offered_seats: u64,
}

impl SeatTally {
    fn add(&mut self, session: &Session, capacity: u32) {
        self.session_count += 1;
        self.sold_seats += u64::from(session.sold_seats(capacity));
        self.offered_seats += u64::from(capacity);
    }

    /// Sold share of offered seats, in percent.
    pub fn occupancy_percent(&self) -> f64 {
        if self.offered_seats == 0 {
            return 0.0;
        }
        self.sold_seats as f64 * 100.0 / self.offered_seats as f64
    }
}

/// Occupancy of all sessions of one movie in a room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovieOccupancy {
    pub movie_id: MovieId,
    pub tally: SeatTally,
}

/// Occupancy of a single session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOccupancy {
    pub session_id: SessionId,
    pub movie_id: MovieId,
    pub tally: SeatTally,
}

/// Groups the room's sessions by movie, in order of first appearance.
///
/// Sessions that belong to another room are ignored.
pub fn occupancy_by_movie(room: &Room, sessions: &[Session]) -> Vec<MovieOccupancy> {
    let mut groups: Vec<MovieOccupancy> = Vec::new();
    for session in sessions.iter().filter(|s| s.room_id() == room.id()) {
        match groups.iter_mut().find(|g| g.movie_id == session.movie_id()) {
            Some(group) => group.tally.add(session, room.total_seats()),
            None => {
                let mut tally = SeatTally::default();
                tally.add(session, room.total_seats());
                groups.push(MovieOccupancy {
                    movie_id: session.movie_id(),
                    tally,
                });
            }
        }
    }
    groups
}

/// One entry per session of the room, in the given order.
pub fn occupancy_by_session(room: &Room, sessions: &[Session]) -> Vec<SessionOccupancy> {
    sessions
        .iter()
        .filter(|s| s.room_id() == room.id())
        .map(|session| {
            let mut tally = SeatTally::default();
            tally.add(session, room.total_seats());
            SessionOccupancy {
                session_id: session.id(),
                movie_id: session.movie_id(),
                tally,
            }
        })
        .collect()
}

/// Occupancy of every session of the room taken together.
pub fn room_tally(room: &Room, sessions: &[Session]) -> SeatTally {
    let mut tally = SeatTally::default();
    for session in sessions.iter().filter(|s| s.room_id() == room.id()) {
        tally.add(session, room.total_seats());
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RoomId;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    fn room() -> Room {
        Room::new(RoomId::try_new(1).unwrap(), 10).unwrap()
    }

    fn session(id: u32, room: u32, movie: u32, available: u32) -> Session {
        Session::reconstitute(
            SessionId::try_new(id).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 11).unwrap(),
            NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            120,
            RoomId::try_new(room).unwrap(),
            MovieId::try_new(movie).unwrap(),
            Decimal::new(2000, 2),
            available,
        )
    }

    #[test]
    fn no_sessions_is_zero_percent() {
        assert!(occupancy_by_movie(&room(), &[]).is_empty());
        assert_eq!(room_tally(&room(), &[]).occupancy_percent(), 0.0);
    }

    #[test]
    fn groups_by_movie_and_averages_over_offered_seats() {
        let sessions = vec![
            session(1, 1, 7, 5),  // 5 sold
            session(2, 1, 8, 10), // 0 sold
            session(3, 1, 7, 0),  // 10 sold
        ];

        let groups = occupancy_by_movie(&room(), &sessions);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].movie_id, MovieId::try_new(7).unwrap());
        assert_eq!(groups[0].tally.session_count, 2);
        assert_eq!(groups[0].tally.sold_seats, 15);
        assert_eq!(groups[0].tally.offered_seats, 20);
        assert!((groups[0].tally.occupancy_percent() - 75.0).abs() < 1e-9);
        assert_eq!(groups[1].tally.occupancy_percent(), 0.0);
    }

    #[test]
    fn per_session_entries_ignore_other_rooms() {
        let sessions = vec![session(1, 1, 7, 4), session(2, 2, 7, 0)];

        let entries = occupancy_by_session(&room(), &sessions);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].session_id, SessionId::try_new(1).unwrap());
        assert!((entries[0].tally.occupancy_percent() - 60.0).abs() < 1e-9);
    }
}
