pub mod calculations;
pub mod coerce;
pub mod document;
pub mod format;
pub mod models;
pub mod store;

pub use calculations::compute_report;
pub use coerce::parse_or_zero;
pub use document::{Document, RECORD_KEY, SCALAR_FIELDS, SequencesState, UnknownField};
pub use format::{format_currency, format_hours};
pub use models::*;
pub use store::{
    DocumentStore, FallbackStore, SaveReceipt, StoreConfig, StoreError, StoreFactory,
    StoreRegistry,
};
