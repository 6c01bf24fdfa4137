//! HTTP access to the catalog service

pub mod catalog;
pub mod endpoints;
pub mod transport;

pub use catalog::{decode_image, fetch_image, fetch_item_detail, fetch_records};
pub use endpoints::Endpoints;
pub use transport::{HttpResponse, HttpTransport, Transport};
