use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

use traincost_core::{Document, DocumentStore, RECORD_KEY, SaveReceipt, StoreError};

/// SQLite-backed [`DocumentStore`]: one row under the fixed record key,
/// last write wins.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn load(&self) -> Result<Document, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT body FROM document WHERE record_key = ?")
                .bind(RECORD_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;

        let (body,) = row.ok_or(StoreError::NotFound)?;
        debug!(bytes = body.len(), "loaded calculator document");

        serde_json::from_str(&body)
            .map_err(|e| StoreError::Backend(format!("stored document is not valid JSON: {e}")))
    }

    async fn save(&self, document: &Document) -> Result<SaveReceipt, StoreError> {
        let now = Utc::now();
        let mut stamped = document.clone();
        stamped.timestamp = Some(now);

        let body = serde_json::to_string(&stamped)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        sqlx::query(
            "INSERT INTO document (record_key, body, saved_at) VALUES (?, ?, ?)
             ON CONFLICT(record_key) DO UPDATE SET
                body = excluded.body,
                saved_at = excluded.saved_at",
        )
        .bind(RECORD_KEY)
        .bind(&body)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!(%now, "saved calculator document");
        Ok(SaveReceipt::new(now))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_store() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let store = SqliteStore::new_with_pool(pool).await;
        store
            .run_migrations()
            .await
            .expect("Failed to run migrations");
        store
    }

    #[tokio::test]
    async fn load_before_any_save_is_not_found() {
        let store = setup_store().await;

        let result = store.load().await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn save_then_load_round_trips_and_stamps() {
        let store = setup_store().await;
        let mut doc = Document::default();
        doc.set_scalar("totalEmployees", "3500").unwrap();

        let receipt = store.save(&doc).await.expect("Should save document");
        assert!(!receipt.used_fallback);

        let loaded = store.load().await.expect("Should load document");
        assert_eq!(loaded.total_employees, dec!(3500));
        assert_eq!(loaded.timestamp, Some(receipt.timestamp));
    }

    #[tokio::test]
    async fn second_save_overwrites_the_first() {
        let store = setup_store().await;

        let mut first = Document::default();
        first.set_scalar("storesTX", "1").unwrap();
        store.save(&first).await.unwrap();

        let mut second = Document::default();
        second.set_scalar("storesTX", "99").unwrap();
        store.save(&second).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.stores_tx, dec!(99));
    }

    #[tokio::test]
    async fn load_coerces_malformed_numerics_in_a_stored_body() {
        let store = setup_store().await;

        sqlx::query("INSERT INTO document (record_key, body, saved_at) VALUES (?, ?, ?)")
            .bind(RECORD_KEY)
            .bind(r#"{"totalEmployees": "garbage", "storesTX": 55}"#)
            .bind("2026-08-06T00:00:00Z")
            .execute(store.pool())
            .await
            .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.total_employees, dec!(0));
        assert_eq!(loaded.stores_tx, dec!(55));
        // Untouched keys come back as defaults.
        assert_eq!(loaded.stores_nc, dec!(75));
    }

    #[tokio::test]
    async fn load_rejects_a_body_that_is_not_json() {
        let store = setup_store().await;

        sqlx::query("INSERT INTO document (record_key, body, saved_at) VALUES (?, ?, ?)")
            .bind(RECORD_KEY)
            .bind("definitely not json")
            .bind("2026-08-06T00:00:00Z")
            .execute(store.pool())
            .await
            .unwrap();

        assert!(matches!(store.load().await, Err(StoreError::Backend(_))));
    }
}
