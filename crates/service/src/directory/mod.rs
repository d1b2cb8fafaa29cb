//! Directory records: schema-less JSON objects identified by an integer `id`.

pub mod record;
pub mod repository;
pub mod store;

pub use record::Record;
pub use repository::DirectoryRepository;
pub use store::DirectoryStore;
