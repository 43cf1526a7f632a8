use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use traincost_core::{Document, DocumentStore, SaveReceipt, StoreError};

/// JSON-file-backed [`DocumentStore`].
///
/// The whole document lives in one file; a missing file means nothing has
/// been saved yet. Writes go through a sibling temp file and a rename so a
/// crash mid-save leaves the previous snapshot intact.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Document, StoreError> {
        let body = match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        };

        debug!(path = %self.path.display(), bytes = body.len(), "loaded calculator document");

        serde_json::from_str(&body)
            .map_err(|e| StoreError::Backend(format!("stored document is not valid JSON: {e}")))
    }

    async fn save(&self, document: &Document) -> Result<SaveReceipt, StoreError> {
        let now = Utc::now();
        let mut stamped = document.clone();
        stamped.timestamp = Some(now);

        let body = serde_json::to_string_pretty(&stamped)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, body.as_bytes())
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!(path = %self.path.display(), %now, "saved calculator document");
        Ok(SaveReceipt::new(now))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("traincost-backup.json"))
    }

    #[tokio::test]
    async fn load_before_any_save_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.load().await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn save_then_load_round_trips_and_stamps() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut doc = Document::default();
        doc.set_scalar("avgHourlyRate", "18.50").unwrap();

        let receipt = store.save(&doc).await.expect("Should save document");
        let loaded = store.load().await.expect("Should load document");

        assert_eq!(loaded.avg_hourly_rate, dec!(18.50));
        assert_eq!(loaded.timestamp, Some(receipt.timestamp));
    }

    #[tokio::test]
    async fn second_save_overwrites_the_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut first = Document::default();
        first.set_scalar("storesAR", "1").unwrap();
        store.save(&first).await.unwrap();

        let mut second = Document::default();
        second.set_scalar("storesAR", "12").unwrap();
        store.save(&second).await.unwrap();

        assert_eq!(store.load().await.unwrap().stores_ar, dec!(12));
    }

    #[tokio::test]
    async fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/dir/backup.json"));

        store.save(&Document::default()).await.unwrap();

        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn no_temp_file_is_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&Document::default()).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn load_coerces_malformed_numerics_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(
            store.path(),
            r#"{"frontlineTurnover": [], "storesMS": "40"}"#,
        )
        .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.frontline_turnover, dec!(0));
        assert_eq!(loaded.stores_ms, dec!(40));
    }

    #[tokio::test]
    async fn load_rejects_a_file_that_is_not_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(store.path(), "definitely not json").unwrap();

        assert!(matches!(store.load().await, Err(StoreError::Backend(_))));
    }
}
