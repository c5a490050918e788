//! Adapters - Implementations of port interfaces.
//!
//! - `flatfile` - Text-file stores for every entity and the loader that
//!   cross-links them at startup

pub mod flatfile;

pub use flatfile::{Catalog, CatalogLoader, FlatFileStore, LoadReport};
