//! Runtime configuration for the catalog client

use serde::{Deserialize, Serialize};

/// Default list endpoint of the public catalog API
pub const DEFAULT_BASE_URL: &str = "https://api.tcgdex.net/v2/en/cards";

/// Key under which the record collection is persisted
pub const DEFAULT_RECORDS_KEY: &str = "cachedCardItems";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// `scheme://host/path` of the list endpoint; detail requests append the id
    pub base_url: String,
    /// Extension appended to image URLs after the quality token
    pub image_extension: String,
    pub user_agent: String,
    pub records_key: String,
    pub request_timeout_secs: u64,
    pub image_cache: ImageCacheConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_extension: "png".to_string(),
            user_agent: "TCG-Catalog/1.0".to_string(),
            records_key: DEFAULT_RECORDS_KEY.to_string(),
            request_timeout_secs: 30,
            image_cache: ImageCacheConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Same defaults, different list endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Bounds for the in-memory image cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageCacheConfig {
    pub max_entries: usize,
    pub max_bytes: usize,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            max_bytes: 64 * 1024 * 1024,
        }
    }
}
