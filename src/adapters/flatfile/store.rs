//! Flat-file entity store - implementation of the repository ports.
//!
//! Each store owns one entity collection and the file that backs it. The
//! collection is held in memory in insertion order and the whole file is
//! rewritten after every mutation.
//!
//! # Atomic Writes
//!
//! Writes go through a write-to-temp-then-rename sequence:
//! 1. Write every record to `{file}.tmp`
//! 2. Sync to disk
//! 3. Rename over `{file}`
//!
//! A mutation is applied to a copy of the collection and only swapped in
//! once the file has been replaced, so a failed write leaves both the file
//! and the in-memory collection untouched.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use super::codec::StoredEntity;
use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, IdSequence, MovieId, Repository, RoomId, SessionId, MAX_ID,
};
use crate::domain::movie::Movie;
use crate::domain::session::Session;
use crate::domain::ticket::Ticket;
use crate::ports::{MovieRepository, SessionRepository, TicketRepository};

/// A collection of `E` persisted to `{data_dir}/{E::FILE_NAME}`.
pub struct FlatFileStore<E: StoredEntity> {
    path: PathBuf,
    records: RwLock<Vec<E>>,
    ids: IdSequence,
}

impl<E: StoredEntity> FlatFileStore<E> {
    /// Creates an empty store. Nothing is written until the first mutation.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::with_records(data_dir, Vec::new())
    }

    /// Creates a store holding already-decoded records.
    ///
    /// The id sequence is advanced past every record's id.
    pub(crate) fn with_records(data_dir: impl AsRef<Path>, records: Vec<E>) -> Self {
        let ids = IdSequence::new();
        for record in &records {
            ids.observe(E::raw_id(record.key()));
        }
        Self {
            path: data_dir.as_ref().join(E::FILE_NAME),
            records: RwLock::new(records),
            ids,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Rewrites the backing file from the current collection.
    pub async fn persist_all(&self) -> Result<(), DomainError> {
        let records = self.records.read().await;
        self.write_file(&records).await
    }

    /// Applies `change` to a copy of the collection, persists the copy and
    /// then swaps it in.
    async fn mutate<F, R>(&self, change: F) -> Result<R, DomainError>
    where
        F: FnOnce(&mut Vec<E>) -> Result<R, DomainError> + Send,
        R: Send,
    {
        let mut records = self.records.write().await;
        let mut next = records.clone();
        let outcome = change(&mut next)?;
        self.write_file(&next).await?;
        *records = next;
        Ok(outcome)
    }

    async fn write_file(&self, records: &[E]) -> Result<(), DomainError> {
        let mut content = String::new();
        for record in records {
            content.push_str(&record.encode());
            content.push('\n');
        }

        if let Err(e) = self.replace_file(&content).await {
            tracing::error!(
                file = %self.path.display(),
                error = %e,
                "Failed to persist records"
            );
            return Err(e);
        }

        tracing::debug!(
            file = %self.path.display(),
            records = records.len(),
            "Persisted records"
        );
        Ok(())
    }

    async fn replace_file(&self, content: &str) -> Result<(), DomainError> {
        let file_name = E::FILE_NAME;
        let temp_path = self.temp_path();

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(|e| {
                DomainError::persistence(
                    file_name,
                    format!("Failed to create data directory {}: {}", dir.display(), e),
                )
            })?;
        }

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            DomainError::persistence(
                file_name,
                format!("Failed to create temp file {}: {}", temp_path.display(), e),
            )
        })?;

        file.write_all(content.as_bytes()).await.map_err(|e| {
            DomainError::persistence(
                file_name,
                format!("Failed to write temp file {}: {}", temp_path.display(), e),
            )
        })?;

        file.sync_all().await.map_err(|e| {
            DomainError::persistence(
                file_name,
                format!("Failed to sync temp file {}: {}", temp_path.display(), e),
            )
        })?;

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            DomainError::persistence(
                file_name,
                format!(
                    "Failed to rename {} to {}: {}",
                    temp_path.display(),
                    self.path.display(),
                    e
                ),
            )
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn filter(&self, keep: impl Fn(&E) -> bool + Send) -> Vec<E> {
        self.records
            .read()
            .await
            .iter()
            .filter(|record| keep(record))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl<E: StoredEntity> Repository<E, E::Id> for FlatFileStore<E> {
    fn next_id(&self) -> Result<E::Id, DomainError> {
        self.ids.allocate().map(E::id_from_allocated).ok_or_else(|| {
            DomainError::new(
                ErrorCode::IdsExhausted,
                format!("Every id up to {} is taken in {}", MAX_ID, E::FILE_NAME),
            )
        })
    }

    async fn reset_ids(&self) -> Result<(), DomainError> {
        if !self.records.read().await.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InvalidState,
                format!("Cannot reset ids while {} holds records", E::FILE_NAME),
            ));
        }
        self.ids.reset();
        Ok(())
    }

    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.key() == id)
            .cloned())
    }

    async fn add(&self, entity: &E) -> Result<(), DomainError> {
        let id = entity.key();
        self.mutate(|records| {
            if records.iter().any(|record| record.key() == id) {
                return Err(DomainError::new(
                    ErrorCode::DuplicateId,
                    format!("Id {} already exists in {}", id, E::FILE_NAME),
                ));
            }
            records.push(entity.clone());
            Ok(())
        })
        .await?;
        self.ids.observe(E::raw_id(id));
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<(), DomainError> {
        let id = entity.key();
        self.mutate(|records| match records.iter_mut().find(|r| r.key() == id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                E::NOT_FOUND,
                format!("No record with id {} in {}", id, E::FILE_NAME),
            )),
        })
        .await
    }

    async fn remove_by_id(&self, id: E::Id) -> Result<bool, DomainError> {
        if !self.records.read().await.iter().any(|r| r.key() == id) {
            return Ok(false);
        }
        self.mutate(|records| {
            let before = records.len();
            records.retain(|r| r.key() != id);
            Ok(records.len() != before)
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.records.read().await.clone())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.mutate(|records| {
            records.clear();
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl MovieRepository for FlatFileStore<Movie> {
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|movie| movie.has_title(title))
            .cloned())
    }
}

#[async_trait]
impl SessionRepository for FlatFileStore<Session> {
    async fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Session>, DomainError> {
        Ok(self.filter(|s| s.room_id() == room_id).await)
    }

    async fn find_by_movie(&self, movie_id: MovieId) -> Result<Vec<Session>, DomainError> {
        Ok(self.filter(|s| s.movie_id() == movie_id).await)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Session>, DomainError> {
        Ok(self.filter(|s| s.date() == date).await)
    }
}

#[async_trait]
impl TicketRepository for FlatFileStore<Ticket> {
    async fn find_by_session(&self, session_id: SessionId) -> Result<Vec<Ticket>, DomainError> {
        Ok(self.filter(|t| t.session_id() == session_id).await)
    }

    async fn find_by_client(&self, client_id: ClientId) -> Result<Vec<Ticket>, DomainError> {
        Ok(self.filter(|t| t.client_id() == client_id).await)
    }
}
