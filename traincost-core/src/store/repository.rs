use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::document::Document;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No document has ever been saved under the record key.
    #[error("Record not found")]
    NotFound,

    #[error("Store error: {0}")]
    Backend(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Outcome of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReceipt {
    /// The timestamp the store stamped into the saved document.
    pub timestamp: DateTime<Utc>,
    /// True when the primary store was unavailable and the secondary
    /// absorbed the write.
    pub used_fallback: bool,
}

impl SaveReceipt {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            used_fallback: false,
        }
    }
}

/// Persistence port for the calculator snapshot.
///
/// One opaque document under one fixed record key, last write wins, no
/// versioning. Implementations re-stamp the document with a fresh timestamp
/// at save time and return that timestamp in the receipt.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Loads the saved document, or [`StoreError::NotFound`] if nothing has
    /// been saved yet.
    async fn load(&self) -> Result<Document, StoreError>;

    /// Saves the full current snapshot, freshly timestamped.
    async fn save(&self, document: &Document) -> Result<SaveReceipt, StoreError>;
}
