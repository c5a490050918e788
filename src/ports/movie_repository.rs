//! Movie repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MovieId, Repository};
use crate::domain::movie::Movie;

/// Repository port for the movie catalog.
#[async_trait]
pub trait MovieRepository: Repository<Movie, MovieId> {
    /// Find a movie by title, ignoring case and surrounding whitespace.
    ///
    /// Returns the first match in insertion order.
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, DomainError>;
}
