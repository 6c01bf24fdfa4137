//! Fetch-and-decode for the catalog endpoints.
//!
//! Every request goes through a [`Transport`]; any status outside 200..=299 is
//! rejected before the body is decoded.

use crate::api::transport::Transport;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogItemDetail, CatalogRecord, ImageBlob};
use reqwest::Url;

/// GET a URL and return the body of a successful response
async fn fetch_ok<T: Transport>(transport: &T, url: &Url) -> CatalogResult<Vec<u8>> {
    let response = transport.get(url).await?;

    if response.is_success() {
        Ok(response.body)
    } else {
        log::debug!("{} answered with HTTP {}", url, response.status);
        Err(CatalogError::status(response.status))
    }
}

/// Fetch the full record list, preserving server order
pub async fn fetch_records<T: Transport>(
    transport: &T,
    url: &Url,
) -> CatalogResult<Vec<CatalogRecord>> {
    let body = fetch_ok(transport, url).await?;
    let records: Vec<CatalogRecord> = serde_json::from_slice(&body)?;

    log::info!("{} card records retrieved from network", records.len());
    Ok(records)
}

/// Fetch the detail payload for one record
pub async fn fetch_item_detail<T: Transport>(
    transport: &T,
    url: &Url,
) -> CatalogResult<CatalogItemDetail> {
    log::info!("Fetching card detail: {}", url);

    let body = fetch_ok(transport, url).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Fetch and decode an image
pub async fn fetch_image<T: Transport>(transport: &T, url: &Url) -> CatalogResult<ImageBlob> {
    let body = fetch_ok(transport, url).await?;
    decode_image(url.as_str(), body)
}

/// Validate that `bytes` hold a decodable image and wrap them
pub fn decode_image(url: &str, bytes: Vec<u8>) -> CatalogResult<ImageBlob> {
    let image = image::load_from_memory(&bytes).map_err(|e| CatalogError::InvalidImageData {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    Ok(ImageBlob {
        url: url.to_string(),
        width: image.width(),
        height: image.height(),
        bytes,
    })
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
