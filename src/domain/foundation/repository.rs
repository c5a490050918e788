//! Base repository trait for persistence operations.
//!
//! This module provides the generic `Repository<T, ID>` trait that defines
//! the store contract shared by every entity collection: insertion-ordered
//! listing, lookup by id, full-record replacement, removal and id allocation.
//!
//! Entity-specific repositories in `crate::ports` extend this trait with their
//! own queries.

use async_trait::async_trait;
use std::fmt::Debug;

use super::DomainError;

/// Base trait for entity stores.
///
/// # Type Parameters
///
/// - `T`: The entity type being persisted
/// - `ID`: The identifier type for the entity (e.g., `SessionId`, `TicketId`)
///
/// # Persistence
///
/// Every mutating call persists the whole collection before returning. When
/// persisting fails the call returns `PersistenceFailure` and the collection
/// is left exactly as it was. Reads never touch the backing storage.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync + Debug + 'static,
{
    /// Allocates the next id for a freshly created entity.
    ///
    /// # Errors
    ///
    /// - `IdsExhausted` once every id up to `MAX_ID` has been used
    fn next_id(&self) -> Result<ID, DomainError>;

    /// Rewinds id allocation to 1.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the store still holds entities
    async fn reset_ids(&self) -> Result<(), DomainError>;

    /// Finds an entity by its identifier.
    ///
    /// Returns `Ok(None)` if the entity doesn't exist.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, DomainError>;

    /// Appends a new entity.
    ///
    /// # Errors
    ///
    /// - `DuplicateId` if an entity with the same id exists
    /// - `PersistenceFailure` if the collection could not be written
    async fn add(&self, entity: &T) -> Result<(), DomainError>;

    /// Replaces the entity with the same id, keeping its position.
    ///
    /// # Errors
    ///
    /// - `*NotFound` if no entity has that id
    /// - `PersistenceFailure` if the collection could not be written
    async fn update(&self, entity: &T) -> Result<(), DomainError>;

    /// Removes an entity by id. Returns whether anything was removed.
    ///
    /// References held by other stores are not checked here; the removal
    /// handlers in `crate::application` refuse entities that are still
    /// referenced.
    ///
    /// # Errors
    ///
    /// - `PersistenceFailure` if the collection could not be written
    async fn remove_by_id(&self, id: ID) -> Result<bool, DomainError>;

    /// Returns every entity in insertion order.
    async fn list_all(&self) -> Result<Vec<T>, DomainError>;

    /// Removes every entity.
    ///
    /// # Errors
    ///
    /// - `PersistenceFailure` if the collection could not be written
    async fn clear(&self) -> Result<(), DomainError>;

    /// Checks if an entity with the given ID exists.
    async fn exists(&self, id: ID) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
