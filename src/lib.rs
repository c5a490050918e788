//! Box Office - Cinema catalog, seat inventory and ticket sales
//!
//! Movies, rooms, sessions, clients and tickets are kept in flat files, one
//! per entity type. The purchase workflow sells one seat at a time, applies
//! the client's loyalty discount, and keeps tickets, seat counters and loyalty
//! ledgers consistent across restarts.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
