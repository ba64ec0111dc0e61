//! Infrastructure layer: draft persistence, catalogue storage, config.

pub mod catalogue_store;
pub mod config;
pub mod draft_store;

pub use catalogue_store::{CatalogueStore, InMemoryCatalogueStore};
pub use config::{ConfigError, StorefrontConfig};
pub use draft_store::{DraftStore, DraftStoreError, InMemoryDraftStore, SqliteDraftStore};
