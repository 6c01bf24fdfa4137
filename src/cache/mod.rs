//! Caching layer: persisted record collection and in-memory images

pub mod image_cache;
pub mod record_cache;
pub mod sqlite_store;
pub mod store;

pub use image_cache::{CacheStats, ImageCache};
pub use record_cache::{load_records, save_records};
pub use sqlite_store::SqliteStore;
pub use store::{FileStore, KeyValueStore, MemoryStore};
