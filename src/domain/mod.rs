//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, id allocation, errors, repository contract)
//! - `movie`, `room`, `session`, `client`, `ticket` - The cinema's entities
//! - `loyalty` - Point accrual and discount policies
//! - `occupancy` - Pure occupancy aggregation over a room's sessions

pub mod client;
pub mod foundation;
pub mod loyalty;
pub mod movie;
pub mod occupancy;
pub mod room;
pub mod session;
pub mod ticket;
