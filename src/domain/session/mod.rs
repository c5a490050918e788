//! Session module - scheduled screenings and their seat inventory.

mod aggregate;

pub use aggregate::Session;
