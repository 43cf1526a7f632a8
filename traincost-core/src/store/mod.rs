pub mod factory;
pub mod fallback;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use fallback::FallbackStore;
pub use repository::{DocumentStore, SaveReceipt, StoreError};
