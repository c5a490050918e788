//! Room handlers.

mod remove_room;
mod room_occupancy;

pub use remove_room::{RemoveRoomCommand, RemoveRoomHandler, RemoveRoomResult};
pub use room_occupancy::{
    OccupancyGrouping, OccupancyLine, RoomOccupancyHandler, RoomOccupancyQuery,
    RoomOccupancyReport,
};
