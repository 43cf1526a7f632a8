use async_trait::async_trait;
use tracing::warn;

use crate::document::Document;

use super::repository::{DocumentStore, SaveReceipt, StoreError};

/// A [`DocumentStore`] that degrades from a primary store to a secondary
/// one instead of surfacing availability failures.
///
/// * **Load**: the primary's answer wins, including `NotFound` (a chain
///   that has never saved should start from defaults, not from a stale
///   backup). Any other primary failure falls through to the secondary.
/// * **Save**: a successful primary write is mirrored to the secondary as
///   a backup; a failed mirror is only logged. When the primary is down the
///   secondary alone takes the write and the receipt is flagged
///   `used_fallback`, still a success from the caller's point of view.
///
/// The caller sees a plain `DocumentStore`; which side actually served a
/// request is visible only in the receipt flag and the logs.
pub struct FallbackStore {
    primary: Box<dyn DocumentStore>,
    secondary: Box<dyn DocumentStore>,
}

impl FallbackStore {
    pub fn new(
        primary: Box<dyn DocumentStore>,
        secondary: Box<dyn DocumentStore>,
    ) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl DocumentStore for FallbackStore {
    async fn load(&self) -> Result<Document, StoreError> {
        match self.primary.load().await {
            Ok(document) => Ok(document),
            Err(StoreError::NotFound) => Err(StoreError::NotFound),
            Err(error) => {
                warn!(%error, "primary store load failed, trying fallback");
                self.secondary.load().await
            }
        }
    }

    async fn save(&self, document: &Document) -> Result<SaveReceipt, StoreError> {
        match self.primary.save(document).await {
            Ok(receipt) => {
                if let Err(error) = self.secondary.save(document).await {
                    warn!(%error, "backup save to fallback store failed");
                }
                Ok(receipt)
            }
            Err(error) => {
                warn!(%error, "primary store save failed, writing to fallback");
                let receipt = self.secondary.save(document).await?;
                Ok(SaveReceipt {
                    used_fallback: true,
                    ..receipt
                })
            }
        }
    }
}
