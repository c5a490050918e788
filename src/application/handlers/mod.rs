//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

mod client;
mod movie;
mod room;
mod session;
mod ticket;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{RemoveClientCommand, RemoveClientHandler, RemoveClientResult};
pub use movie::{RemoveMovieCommand, RemoveMovieHandler, RemoveMovieResult};
pub use room::{
    OccupancyGrouping, OccupancyLine, RemoveRoomCommand, RemoveRoomHandler, RemoveRoomResult,
    RoomOccupancyHandler, RoomOccupancyQuery, RoomOccupancyReport,
};
pub use session::{
    CancelSessionCommand, CancelSessionHandler, CancelSessionResult, ScheduleSessionCommand,
    ScheduleSessionHandler, ScheduleSessionResult,
};
pub use ticket::{
    DiscountQuote, PurchaseStage, PurchaseTicketCommand, PurchaseTicketHandler,
    PurchaseTicketResult, QuoteDiscountHandler, QuoteDiscountQuery,
};
