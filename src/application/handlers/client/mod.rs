//! Client command handlers.

mod remove_client;

pub use remove_client::{RemoveClientCommand, RemoveClientHandler, RemoveClientResult};
