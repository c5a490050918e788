//! Movie catalog entry.

use crate::domain::foundation::{require_text, validate_text, MovieId, ValidationError};

/// A movie that can be scheduled into sessions.
///
/// # Invariants
///
/// - `duration_minutes > 0`
/// - `title` is non-blank
/// - no text field contains the record delimiter or a line break
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    id: MovieId,
    title: String,
    genre: String,
    duration_minutes: u32,
    classification: String,
    synopsis: String,
}

impl Movie {
    /// Creates a movie, validating every field.
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        genre: impl Into<String>,
        duration_minutes: u32,
        classification: impl Into<String>,
        synopsis: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let movie = Self {
            id,
            title: title.into(),
            genre: genre.into(),
            duration_minutes,
            classification: classification.into(),
            synopsis: synopsis.into(),
        };
        movie.validate()?;
        Ok(movie)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        validate_text("genre", &self.genre)?;
        validate_text("classification", &self.classification)?;
        validate_text("synopsis", &self.synopsis)?;
        if self.duration_minutes == 0 {
            return Err(ValidationError::out_of_range("duration_minutes", 1, i32::MAX, 0));
        }
        Ok(())
    }

    pub fn id(&self) -> MovieId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn classification(&self) -> &str {
        &self.classification
    }

    pub fn synopsis(&self) -> &str {
        &self.synopsis
    }

    /// Case-insensitive comparison against a trimmed title.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.trim().to_lowercase() == title.trim().to_lowercase()
    }
}
