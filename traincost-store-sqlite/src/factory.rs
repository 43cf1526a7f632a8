use async_trait::async_trait;

use traincost_core::store::factory::{StoreConfig, StoreFactory};
use traincost_core::store::repository::{DocumentStore, StoreError};

use crate::repository::SqliteStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`traincost_core::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use traincost_core::StoreRegistry;
/// use traincost_store_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.location`.
    ///
    /// Accepted location values are sqlx SQLite URLs:
    /// * `sqlite:traincost.db?mode=rwc` — a file, created if missing.
    /// * `sqlite::memory:` — an ephemeral in-memory database (useful for
    ///   tests).
    ///
    /// Migrations run inside this method, so the returned store is ready
    /// for `load`/`save` immediately.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn DocumentStore>, StoreError> {
        let store = SqliteStore::new(&config.location).await?;
        store.run_migrations().await?;
        Ok(Box::new(store))
    }
}
