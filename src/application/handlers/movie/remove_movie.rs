//! RemoveMovieHandler - Command handler for withdrawing a movie from the catalog.

use std::sync::Arc;

use crate::application::CommitGate;
use crate::domain::foundation::{DomainError, ErrorCode, MovieId};
use crate::domain::movie::Movie;
use crate::ports::{MovieRepository, SessionRepository};

/// Command to remove a movie.
#[derive(Debug, Clone)]
pub struct RemoveMovieCommand {
    pub movie_id: MovieId,
}

/// Result of a successful removal.
#[derive(Debug, Clone)]
pub struct RemoveMovieResult {
    pub movie: Movie,
}

pub struct RemoveMovieHandler {
    movies: Arc<dyn MovieRepository>,
    sessions: Arc<dyn SessionRepository>,
    gate: CommitGate,
}

impl RemoveMovieHandler {
    pub fn new(
        movies: Arc<dyn MovieRepository>,
        sessions: Arc<dyn SessionRepository>,
        gate: CommitGate,
    ) -> Self {
        Self {
            movies,
            sessions,
            gate,
        }
    }

    pub async fn handle(&self, cmd: RemoveMovieCommand) -> Result<RemoveMovieResult, DomainError> {
        let _commit = self.gate.exclusive().await;

        let movie = self.movies.find_by_id(cmd.movie_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::MovieNotFound,
                format!("Movie not found: {}", cmd.movie_id),
            )
        })?;

        // Sessions without their movie are skipped on load, and their tickets with them.
        let scheduled = self.sessions.find_by_movie(movie.id()).await?.len();
        if scheduled > 0 {
            return Err(DomainError::new(
                ErrorCode::InvalidState,
                format!("Movie {} still has {} sessions", movie.id(), scheduled),
            )
            .with_detail("sessions", scheduled.to_string()));
        }

        self.movies.remove_by_id(movie.id()).await?;
        tracing::info!(movie_id = %movie.id(), title = movie.title(), "Movie removed");

        Ok(RemoveMovieResult { movie })
    }
}
