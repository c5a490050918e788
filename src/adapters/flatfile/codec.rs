//! Delimited text codec for every entity type.
//!
//! One entity per line, fields separated by `;`:
//!
//! | File           | Fields                                                        |
//! |----------------|---------------------------------------------------------------|
//! | `movies.txt`   | `id;title;genre;durationMinutes;classification;synopsis`      |
//! | `rooms.txt`    | `id;totalSeats`                                               |
//! | `sessions.txt` | `id;dd-MM-yyyy;HH:mm;roomId;movieId;ticketPrice;availableSeats` |
//! | `clients.txt`  | `id;name;email;cpf;dd-MM-yyyy`                                |
//! | `tickets.txt`  | `id;clientId;sessionId;finalPrice;PAYMENT_TOKEN`              |
//!
//! Decimals use `.` as separator. Foreign keys are decoded as ids only; the
//! loader resolves them.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::client::Client;
use crate::domain::foundation::{
    ClientId, ErrorCode, MovieId, RoomId, SessionId, TicketId, ValidationError,
};
use crate::domain::movie::Movie;
use crate::domain::room::Room;
use crate::domain::session::Session;
use crate::domain::ticket::{PaymentMethod, Ticket};

pub const DELIMITER: char = ';';
pub const DATE_FORMAT: &str = "%d-%m-%Y";
pub const TIME_FORMAT: &str = "%H:%M";

/// Why a persisted line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("field '{field}': '{value}' is not a valid number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field '{field}': '{value}' is not a dd-MM-yyyy date")]
    InvalidDate { field: &'static str, value: String },

    #[error("field '{field}': '{value}' is not an HH:mm time")]
    InvalidTime { field: &'static str, value: String },

    #[error("field '{field}': '{value}' is not a non-negative decimal")]
    InvalidDecimal { field: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// An entity that lives in its own flat file.
pub trait StoredEntity: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Ord + Debug + Display + Send + Sync + 'static;

    /// File name under the data directory.
    const FILE_NAME: &'static str;

    /// Code reported when `update` misses.
    const NOT_FOUND: ErrorCode;

    fn key(&self) -> Self::Id;

    fn raw_id(id: Self::Id) -> u32;

    fn id_from_allocated(raw: u32) -> Self::Id;

    /// Renders the entity as one line, without the trailing newline.
    fn encode(&self) -> String;
}

fn split(line: &str, expected: usize) -> Result<Vec<&str>, RecordError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != expected {
        return Err(RecordError::FieldCount {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

fn parse_u32(field: &'static str, value: &str) -> Result<u32, RecordError> {
    value.trim().parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| RecordError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, RecordError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| RecordError::InvalidTime {
        field,
        value: value.to_string(),
    })
}

fn parse_money(field: &'static str, value: &str) -> Result<Decimal, RecordError> {
    match Decimal::from_str(value.trim()) {
        Ok(amount) if amount >= Decimal::ZERO => Ok(amount),
        _ => Err(RecordError::InvalidDecimal {
            field,
            value: value.to_string(),
        }),
    }
}

fn join(fields: &[String]) -> String {
    fields.join(&DELIMITER.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Movie
// ─────────────────────────────────────────────────────────────────────────────

impl StoredEntity for Movie {
    type Id = MovieId;
    const FILE_NAME: &'static str = "movies.txt";
    const NOT_FOUND: ErrorCode = ErrorCode::MovieNotFound;

    fn key(&self) -> MovieId {
        self.id()
    }

    fn raw_id(id: MovieId) -> u32 {
        id.value()
    }

    fn id_from_allocated(raw: u32) -> MovieId {
        MovieId::from_allocated(raw)
    }

    fn encode(&self) -> String {
        join(&[
            self.id().to_string(),
            self.title().to_string(),
            self.genre().to_string(),
            self.duration_minutes().to_string(),
            self.classification().to_string(),
            self.synopsis().to_string(),
        ])
    }
}

pub fn decode_movie(line: &str) -> Result<Movie, RecordError> {
    let f = split(line, 6)?;
    let id: MovieId = f[0].parse()?;
    let duration = parse_u32("duration_minutes", f[3])?;
    Ok(Movie::new(id, f[1], f[2], duration, f[4], f[5])?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Room
// ─────────────────────────────────────────────────────────────────────────────

impl StoredEntity for Room {
    type Id = RoomId;
    const FILE_NAME: &'static str = "rooms.txt";
    const NOT_FOUND: ErrorCode = ErrorCode::RoomNotFound;

    fn key(&self) -> RoomId {
        self.id()
    }

    fn raw_id(id: RoomId) -> u32 {
        id.value()
    }

    fn id_from_allocated(raw: u32) -> RoomId {
        RoomId::from_allocated(raw)
    }

    fn encode(&self) -> String {
        join(&[self.id().to_string(), self.total_seats().to_string()])
    }
}

pub fn decode_room(line: &str) -> Result<Room, RecordError> {
    let f = split(line, 2)?;
    let id: RoomId = f[0].parse()?;
    let seats = parse_u32("total_seats", f[1])?;
    Ok(Room::new(id, seats)?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// A decoded session line whose room and movie are not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: SessionId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub room_id: RoomId,
    pub movie_id: MovieId,
    pub ticket_price: Decimal,
    pub available_seats: u32,
}

impl SessionRecord {
    /// Completes the record with the duration of its resolved movie.
    pub fn into_session(self, duration_minutes: u32) -> Session {
        Session::reconstitute(
            self.id,
            self.date,
            self.time,
            duration_minutes,
            self.room_id,
            self.movie_id,
            self.ticket_price,
            self.available_seats,
        )
    }
}

impl StoredEntity for Session {
    type Id = SessionId;
    const FILE_NAME: &'static str = "sessions.txt";
    const NOT_FOUND: ErrorCode = ErrorCode::SessionNotFound;

    fn key(&self) -> SessionId {
        self.id()
    }

    fn raw_id(id: SessionId) -> u32 {
        id.value()
    }

    fn id_from_allocated(raw: u32) -> SessionId {
        SessionId::from_allocated(raw)
    }

    fn encode(&self) -> String {
        join(&[
            self.id().to_string(),
            self.date().format(DATE_FORMAT).to_string(),
            self.time().format(TIME_FORMAT).to_string(),
            self.room_id().to_string(),
            self.movie_id().to_string(),
            self.ticket_price().to_string(),
            self.available_seats().to_string(),
        ])
    }
}

pub fn decode_session(line: &str) -> Result<SessionRecord, RecordError> {
    let f = split(line, 7)?;
    Ok(SessionRecord {
        id: f[0].parse()?,
        date: parse_date("date", f[1])?,
        time: parse_time("time", f[2])?,
        room_id: f[3].parse()?,
        movie_id: f[4].parse()?,
        ticket_price: parse_money("ticket_price", f[5])?,
        available_seats: parse_u32("available_seats", f[6])?,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

impl StoredEntity for Client {
    type Id = ClientId;
    const FILE_NAME: &'static str = "clients.txt";
    const NOT_FOUND: ErrorCode = ErrorCode::ClientNotFound;

    fn key(&self) -> ClientId {
        self.id()
    }

    fn raw_id(id: ClientId) -> u32 {
        id.value()
    }

    fn id_from_allocated(raw: u32) -> ClientId {
        ClientId::from_allocated(raw)
    }

    fn encode(&self) -> String {
        join(&[
            self.id().to_string(),
            self.name().to_string(),
            self.email().to_string(),
            self.cpf().to_string(),
            self.birthday().format(DATE_FORMAT).to_string(),
        ])
    }
}

/// Decodes a client with an empty loyalty ledger.
pub fn decode_client(line: &str) -> Result<Client, RecordError> {
    let f = split(line, 5)?;
    let id: ClientId = f[0].parse()?;
    let birthday = parse_date("birthday", f[4])?;
    Ok(Client::new(id, f[1], f[3], f[2], birthday)?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Ticket
// ─────────────────────────────────────────────────────────────────────────────

impl StoredEntity for Ticket {
    type Id = TicketId;
    const FILE_NAME: &'static str = "tickets.txt";
    const NOT_FOUND: ErrorCode = ErrorCode::TicketNotFound;

    fn key(&self) -> TicketId {
        self.id()
    }

    fn raw_id(id: TicketId) -> u32 {
        id.value()
    }

    fn id_from_allocated(raw: u32) -> TicketId {
        TicketId::from_allocated(raw)
    }

    fn encode(&self) -> String {
        join(&[
            self.id().to_string(),
            self.client_id().to_string(),
            self.session_id().to_string(),
            self.final_price().to_string(),
            self.payment_method().token().to_string(),
        ])
    }
}

pub fn decode_ticket(line: &str) -> Result<Ticket, RecordError> {
    let f = split(line, 5)?;
    Ok(Ticket::new(
        f[0].parse()?,
        f[1].parse()?,
        f[2].parse()?,
        parse_money("final_price", f[3])?,
        f[4].parse::<PaymentMethod>()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use proptest::prelude::*;

    #[test]
    fn movie_line_round_trips() {
        let movie = decode_movie("3;Alien;Sci-fi;117;14;In space no one can hear you scream").unwrap();
        assert_eq!(movie.title(), "Alien");
        assert_eq!(movie.duration_minutes(), 117);
        assert_eq!(movie.encode(), "3;Alien;Sci-fi;117;14;In space no one can hear you scream");
    }

    #[test]
    fn empty_trailing_field_is_kept() {
        let movie = decode_movie("3;Alien;Sci-fi;117;14;").unwrap();
        assert_eq!(movie.synopsis(), "");
        assert_eq!(movie.encode(), "3;Alien;Sci-fi;117;14;");
    }

    #[test]
    fn wrong_field_count_is_reported() {
        assert_eq!(
            decode_room("1;40;extra"),
            Err(RecordError::FieldCount {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn room_capacity_must_be_positive() {
        assert!(matches!(decode_room("1;0"), Err(RecordError::Invalid(_))));
        assert!(matches!(
            decode_room("1;many"),
            Err(RecordError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn session_line_uses_day_first_dates_and_dot_decimals() {
        let record = decode_session("5;11-06-2025;19:30;1;3;20.50;38").unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 6, 11).unwrap());
        assert_eq!(record.time, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert_eq!(record.ticket_price, Decimal::from_str("20.50").unwrap());

        let session = record.into_session(117);
        assert_eq!(session.encode(), "5;11-06-2025;19:30;1;3;20.50;38");
    }

    #[test]
    fn malformed_session_fields_are_rejected() {
        assert!(matches!(
            decode_session("5;2025-06-11;19:30;1;3;20.50;38"),
            Err(RecordError::InvalidDate { .. })
        ));
        assert!(matches!(
            decode_session("5;11-06-2025;7pm;1;3;20.50;38"),
            Err(RecordError::InvalidTime { .. })
        ));
        assert!(matches!(
            decode_session("5;11-06-2025;19:30;1;3;20,50;38"),
            Err(RecordError::InvalidDecimal { .. })
        ));
        assert!(matches!(
            decode_session("0;11-06-2025;19:30;1;3;20.50;38"),
            Err(RecordError::Invalid(_))
        ));
    }

    #[test]
    fn client_line_orders_email_before_cpf() {
        let client = decode_client("2;Helena;helena@example.com;123.456.789-00;14-03-1990").unwrap();
        assert_eq!(client.email(), "helena@example.com");
        assert_eq!(client.cpf(), "123.456.789-00");
        assert_eq!(
            client.encode(),
            "2;Helena;helena@example.com;123.456.789-00;14-03-1990"
        );
    }

    #[test]
    fn ticket_line_carries_payment_token() {
        let ticket = decode_ticket("9;2;5;18.00;CREDIT_CARD").unwrap();
        assert_eq!(ticket.payment_method(), PaymentMethod::CreditCard);
        assert_eq!(ticket.encode(), "9;2;5;18.00;CREDIT_CARD");
        assert!(decode_ticket("9;2;5;18.00;GOLD").is_err());
    }

    fn text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ,.!?-]{0,20}"
    }

    proptest! {
        #[test]
        fn any_valid_movie_survives_encoding(
            id in 1u32..1_000_000,
            title in "[A-Za-z][A-Za-z0-9 ]{0,20}",
            genre in text(),
            duration in 1u32..600,
            classification in text(),
            synopsis in text(),
        ) {
            let movie = Movie::new(
                MovieId::try_new(id).unwrap(),
                title,
                genre,
                duration,
                classification,
                synopsis,
            ).unwrap();
            prop_assert_eq!(decode_movie(&movie.encode()).unwrap(), movie);
        }

        #[test]
        fn any_valid_session_survives_encoding(
            id in 1u32..1_000_000,
            day in 1u32..28,
            month in 1u32..13,
            year in 2000i32..2100,
            hour in 0u32..24,
            minute in 0u32..60,
            cents in 0i64..100_000,
            seats in 0u32..500,
        ) {
            let session = Session::reconstitute(
                SessionId::try_new(id).unwrap(),
                NaiveDate::from_ymd_opt(year, month, day).unwrap(),
                NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
                90,
                RoomId::try_new(1).unwrap(),
                MovieId::try_new(2).unwrap(),
                Decimal::new(cents, 2),
                seats,
            );
            let decoded = decode_session(&session.encode()).unwrap().into_session(90);
            prop_assert_eq!(decoded, session);
        }

        #[test]
        fn any_valid_client_survives_encoding(
            id in 1u32..1_000_000,
            name in "[A-Za-z][A-Za-z0-9 .'-]{0,20}",
            email in text(),
            cpf in "([0-9]{3}\\.[0-9]{3}\\.[0-9]{3}-[0-9]{2})?",
            days_since_1900 in 0u64..73_000,
        ) {
            let birthday = NaiveDate::from_ymd_opt(1900, 1, 1)
                .unwrap()
                .checked_add_days(Days::new(days_since_1900))
                .unwrap();
            let client = Client::new(ClientId::try_new(id).unwrap(), name, cpf, email, birthday)
                .unwrap();

            let line = client.encode();
            let decoded = decode_client(&line).unwrap();
            prop_assert_eq!(decoded.encode(), line);
            prop_assert_eq!(decoded, client);
        }

        #[test]
        fn any_valid_ticket_survives_encoding(
            id in 1u32..1_000_000,
            client in 1u32..1_000_000,
            session in 1u32..1_000_000,
            mantissa in 0i64..10_000_000,
            scale in 0u32..5,
            payment in proptest::sample::select(PaymentMethod::ALL.to_vec()),
        ) {
            let ticket = Ticket::new(
                TicketId::try_new(id).unwrap(),
                ClientId::try_new(client).unwrap(),
                SessionId::try_new(session).unwrap(),
                Decimal::new(mantissa, scale),
                payment,
            );

            let line = ticket.encode();
            let decoded = decode_ticket(&line).unwrap();
            prop_assert_eq!(decoded.encode(), line);
            prop_assert_eq!(decoded.final_price().scale(), scale);
            prop_assert_eq!(decoded, ticket);
        }
    }
}
