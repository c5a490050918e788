//! Flat-file persistence.
//!
//! One semicolon-delimited text file per entity type under a single data
//! directory. See [`codec`] for the line formats.

pub mod codec;
mod loader;
mod store;

pub use codec::{RecordError, StoredEntity};
pub use loader::{Catalog, CatalogLoader, FileReport, LoadReport};
pub use store::FlatFileStore;
