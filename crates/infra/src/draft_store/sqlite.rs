//! SQLite-backed draft store (local, no network exposure).

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use storefront_catalog::ProductDraft;

use super::{DEFAULT_DRAFT_KEY, DraftStore, DraftStoreError};

#[derive(Debug, Clone)]
pub struct SqliteDraftStore {
    pool: SqlitePool,
    key: String,
}

impl SqliteDraftStore {
    /// Open (or create) the database at `url` and make sure the table exists.
    ///
    /// A single pooled connection is kept open, so `sqlite::memory:` behaves as
    /// one database for the lifetime of the store.
    pub async fn connect(url: &str, key: impl Into<String>) -> Result<Self, DraftStoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::with_pool(pool, key).await
    }

    pub async fn in_memory() -> Result<Self, DraftStoreError> {
        Self::connect("sqlite::memory:", DEFAULT_DRAFT_KEY).await
    }

    pub async fn with_pool(pool: SqlitePool, key: impl Into<String>) -> Result<Self, DraftStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS drafts (
                key      TEXT PRIMARY KEY NOT NULL,
                data     TEXT NOT NULL,
                saved_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self {
            pool,
            key: key.into(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl DraftStore for SqliteDraftStore {
    async fn save_draft(&self, draft: Option<&ProductDraft>) -> Result<(), DraftStoreError> {
        match draft {
            Some(draft) => {
                let data = serde_json::to_string(draft)?;
                sqlx::query(
                    r#"
                    INSERT INTO drafts (key, data, saved_at)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT(key) DO UPDATE SET
                        data = excluded.data,
                        saved_at = excluded.saved_at
                    "#,
                )
                .bind(&self.key)
                .bind(data)
                .bind(Utc::now().to_rfc3339())
                .execute(&self.pool)
                .await?;
                tracing::debug!(key = %self.key, step = draft.step.index(), "draft saved");
            }
            None => {
                sqlx::query("DELETE FROM drafts WHERE key = ?1")
                    .bind(&self.key)
                    .execute(&self.pool)
                    .await?;
                tracing::debug!(key = %self.key, "draft cleared");
            }
        }
        Ok(())
    }

    async fn get_draft(&self) -> Result<Option<ProductDraft>, DraftStoreError> {
        let row = sqlx::query("SELECT data FROM drafts WHERE key = ?1")
            .bind(&self.key)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let data: String = row.try_get("data")?;
        Ok(Some(serde_json::from_str(&data)?))
    }
}
