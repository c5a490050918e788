//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (purchase, schedule, cancel, removals) take the
//! [`CommitGate`] exclusively. Query handlers and the [`CatalogReader`] take
//! it shared.

mod catalog_reader;
mod commit_gate;
pub mod handlers;

pub use catalog_reader::{CatalogReader, SeatSnapshot};
pub use commit_gate::CommitGate;
pub use handlers::{
    // Ticket handlers
    DiscountQuote, PurchaseStage, PurchaseTicketCommand, PurchaseTicketHandler,
    PurchaseTicketResult, QuoteDiscountHandler, QuoteDiscountQuery,
    // Session handlers
    CancelSessionCommand, CancelSessionHandler, CancelSessionResult, ScheduleSessionCommand,
    ScheduleSessionHandler, ScheduleSessionResult,
    // Room handlers
    OccupancyGrouping, OccupancyLine, RemoveRoomCommand, RemoveRoomHandler, RemoveRoomResult,
    RoomOccupancyHandler, RoomOccupancyQuery, RoomOccupancyReport,
    // Client and movie handlers
    RemoveClientCommand, RemoveClientHandler, RemoveClientResult, RemoveMovieCommand,
    RemoveMovieHandler, RemoveMovieResult,
};
