use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use storefront_catalog::ProductDraft;

use super::{DEFAULT_DRAFT_KEY, DraftStore, DraftStoreError};

/// In-memory draft store for tests/dev.
///
/// Keeps the serialized blob rather than the value so reads hand back an
/// independent copy, the same as a real key-value store would.
#[derive(Debug)]
pub struct InMemoryDraftStore {
    key: String,
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_DRAFT_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Raw stored blob (inspection in tests).
    pub fn raw(&self) -> Option<String> {
        self.inner.read().ok()?.get(&self.key).cloned()
    }
}

impl Default for InMemoryDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn save_draft(&self, draft: Option<&ProductDraft>) -> Result<(), DraftStoreError> {
        let blob = draft.map(serde_json::to_string).transpose()?;

        let mut map = self
            .inner
            .write()
            .map_err(|_| DraftStoreError::Unavailable("draft lock poisoned".to_string()))?;
        match blob {
            Some(blob) => {
                map.insert(self.key.clone(), blob);
            }
            None => {
                map.remove(&self.key);
            }
        }
        Ok(())
    }

    async fn get_draft(&self) -> Result<Option<ProductDraft>, DraftStoreError> {
        let blob = {
            let map = self
                .inner
                .read()
                .map_err(|_| DraftStoreError::Unavailable("draft lock poisoned".to_string()))?;
            map.get(&self.key).cloned()
        };

        Ok(blob.map(|b| serde_json::from_str(&b)).transpose()?)
    }
}
