//! Movie command handlers.

mod remove_movie;

pub use remove_movie::{RemoveMovieCommand, RemoveMovieHandler, RemoveMovieResult};
