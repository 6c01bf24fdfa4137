pub mod api;
pub mod cache;
pub mod config;
pub mod detail_view;
pub mod error;
pub mod list_state;
pub mod models;
pub mod service;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use api::{Endpoints, HttpResponse, HttpTransport, Transport};
pub use cache::{FileStore, ImageCache, KeyValueStore, MemoryStore, SqliteStore};
pub use config::CatalogConfig;
pub use detail_view::ItemDetailView;
pub use error::{CatalogError, CatalogResult, StoreError, StoreResult};
pub use list_state::{CatalogListState, ListEvent, ListEvents, EMPTY_LIST_MESSAGE};
pub use models::{CatalogItemDetail, CatalogRecord, ImageBlob, ImageQuality};
pub use service::{CatalogService, CatalogSource};
