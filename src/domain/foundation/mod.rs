//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the id allocator, value objects, error types and
//! the base repository contract that form the vocabulary of the box office.

mod errors;
mod ids;
mod percentage;
mod repository;
mod text;

pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError};
pub use ids::{ClientId, IdSequence, MovieId, RoomId, SessionId, TicketId, MAX_ID};
pub use percentage::DiscountPercent;
pub use repository::Repository;
pub use text::{require_text, validate_text};
