pub mod factory;
pub mod repository;

pub use factory::JsonStoreFactory;
pub use repository::JsonFileStore;
