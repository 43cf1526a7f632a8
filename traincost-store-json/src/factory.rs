use async_trait::async_trait;

use traincost_core::store::factory::{StoreConfig, StoreFactory};
use traincost_core::store::repository::{DocumentStore, StoreError};

use crate::repository::JsonFileStore;

/// [`StoreFactory`] for the JSON file backend.
///
/// `config.location` is the path of the JSON file; it does not need to
/// exist yet. This backend is the usual secondary in a
/// [`traincost_core::FallbackStore`] pairing.
pub struct JsonStoreFactory;

#[async_trait]
impl StoreFactory for JsonStoreFactory {
    fn backend_name(&self) -> &'static str {
        "json"
    }

    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn DocumentStore>, StoreError> {
        if config.location.trim().is_empty() {
            return Err(StoreError::Configuration(
                "json backend requires a file path".to_string(),
            ));
        }
        Ok(Box::new(JsonFileStore::new(config.location.clone())))
    }
}
