//! Ports - Interfaces between the application and its stores.
//!
//! Each port extends the base `Repository<T, ID>` contract from
//! `domain::foundation` with the queries its entity needs.

mod client_repository;
mod movie_repository;
mod room_repository;
mod session_repository;
mod ticket_repository;

pub use client_repository::ClientRepository;
pub use movie_repository::MovieRepository;
pub use room_repository::RoomRepository;
pub use session_repository::SessionRepository;
pub use ticket_repository::TicketRepository;
