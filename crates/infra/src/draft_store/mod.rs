//! Draft persistence: a single draft record under a constant key.
//!
//! Only one writer (the active session) is assumed, so there is no conflict
//! resolution: the last write wins.

pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemoryDraftStore;
pub use sqlite::SqliteDraftStore;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use storefront_catalog::ProductDraft;

/// Key the draft is stored under unless configured otherwise.
pub const DEFAULT_DRAFT_KEY: &str = "draft";

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("failed to encode or decode draft: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("draft storage failed: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("draft store unavailable: {0}")]
    Unavailable(String),
}

/// Store for the singleton product draft.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Write the draft, or delete it when `None`.
    async fn save_draft(&self, draft: Option<&ProductDraft>) -> Result<(), DraftStoreError>;

    /// Read the draft back; `None` when nothing is saved.
    async fn get_draft(&self) -> Result<Option<ProductDraft>, DraftStoreError>;
}

#[async_trait]
impl<S> DraftStore for Arc<S>
where
    S: DraftStore + ?Sized,
{
    async fn save_draft(&self, draft: Option<&ProductDraft>) -> Result<(), DraftStoreError> {
        (**self).save_draft(draft).await
    }

    async fn get_draft(&self) -> Result<Option<ProductDraft>, DraftStoreError> {
        (**self).get_draft().await
    }
}
