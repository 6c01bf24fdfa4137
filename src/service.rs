//! Cache-first data access for the card catalog.
//!
//! The record list is served stale-while-revalidate: a persisted snapshot is
//! returned immediately while a detached task refreshes the store for the next
//! caller. Details are always fetched live, images go through an in-memory LRU.

use crate::api::{fetch_image, fetch_item_detail, fetch_records, Endpoints, Transport};
use crate::cache::{load_records, save_records, CacheStats, ImageCache, KeyValueStore};
use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult, StoreResult};
use crate::models::{CatalogItemDetail, CatalogRecord, ImageBlob, ImageQuality};
use reqwest::Url;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Anything that can produce the current record list
pub trait CatalogSource {
    fn catalog_list(&self) -> impl Future<Output = CatalogResult<Vec<CatalogRecord>>> + Send;
}

pub struct CatalogService<T, S> {
    endpoints: Endpoints,
    records_key: String,
    transport: Arc<T>,
    store: Arc<S>,
    images: ImageCache,
    /// Most recent background refresh, kept only so shutdown can wait on it
    pending_refresh: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Transport, S: KeyValueStore> CatalogService<T, S> {
    pub fn new(config: &CatalogConfig, transport: T, store: S) -> CatalogResult<Self> {
        Self::from_shared(config, Arc::new(transport), Arc::new(store))
    }

    /// Build a service over handles the caller keeps a clone of
    pub fn from_shared(
        config: &CatalogConfig,
        transport: Arc<T>,
        store: Arc<S>,
    ) -> CatalogResult<Self> {
        Ok(Self {
            endpoints: Endpoints::new(config)?,
            records_key: config.records_key.clone(),
            transport,
            store,
            images: ImageCache::new(config.image_cache),
            pending_refresh: Mutex::new(None),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Current record list, cache first.
    ///
    /// With a non-empty persisted snapshot this returns the snapshot and starts a
    /// background refresh whose outcome only affects later calls. Without one it
    /// fetches, persists and returns the network result. Must be called from
    /// within a tokio runtime.
    pub async fn get_catalog_list(&self) -> CatalogResult<Vec<CatalogRecord>> {
        if let Some(cached) = self.load_snapshot().await {
            if !cached.is_empty() {
                log::info!("{} card records retrieved from cache", cached.len());
                self.spawn_refresh();
                return Ok(cached);
            }
        }

        log::info!("Record cache miss, fetching from network");
        let fresh = fetch_records(&*self.transport, self.endpoints.list_url()).await?;
        persist_snapshot(Arc::clone(&self.store), self.records_key.clone(), fresh.clone()).await;
        Ok(fresh)
    }

    /// Store reads run on the blocking pool
    async fn load_snapshot(&self) -> Option<Vec<CatalogRecord>> {
        let store = Arc::clone(&self.store);
        let key = self.records_key.clone();
        match tokio::task::spawn_blocking(move || load_records(&*store, &key)).await {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Record cache read did not complete: {}", e);
                None
            }
        }
    }

    /// Detached refresh; its only side effect is overwriting the store.
    ///
    /// At most one refresh runs at a time, so an older response can never
    /// overwrite a newer one. Calls made while one is in flight start nothing.
    fn spawn_refresh(&self) {
        let mut pending = self.pending_refresh.lock().unwrap_or_else(|e| e.into_inner());
        if pending.as_ref().is_some_and(|handle| !handle.is_finished()) {
            log::debug!("Card record refresh already in flight");
            return;
        }

        let transport = Arc::clone(&self.transport);
        let store = Arc::clone(&self.store);
        let url = self.endpoints.list_url().clone();
        let key = self.records_key.clone();

        *pending = Some(tokio::spawn(async move {
            match fetch_records(&*transport, &url).await {
                Ok(fresh) => persist_snapshot(store, key, fresh).await,
                Err(e) => log::warn!("Failed to refresh card records: {}", e),
            }
        }));
    }

    /// Wait for the background refresh, if one was started.
    ///
    /// Only needed before the runtime shuts down; reads never wait on it.
    pub async fn finish_refresh(&self) {
        let handle = self
            .pending_refresh
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                log::warn!("Background refresh did not complete: {}", e);
            }
        }
    }

    /// Full detail for one record, always from the network
    pub async fn get_item_detail(&self, id: &str) -> CatalogResult<CatalogItemDetail> {
        let url = self.endpoints.detail_url(id)?;
        fetch_item_detail(&*self.transport, &url).await
    }

    /// Image at `url`, served from the in-memory cache when present.
    ///
    /// Concurrent misses for the same URL each go to the network.
    pub async fn get_image(&self, url: &str) -> CatalogResult<Arc<ImageBlob>> {
        if let Some(blob) = self.images.get(url) {
            log::info!("Image retrieved from cache: {}", url);
            return Ok(blob);
        }

        let parsed =
            Url::parse(url).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", url, e)))?;
        let mut blob = fetch_image(&*self.transport, &parsed).await?;
        // Keyed by the caller's string, not the normalized URL
        blob.url = url.to_string();

        log::info!("Image retrieved from network: {}", url);
        let blob = Arc::new(blob);
        self.images.insert(Arc::clone(&blob));
        Ok(blob)
    }

    /// Image for an asset base URL at the given quality; `None` without a base
    pub async fn image_for(
        &self,
        image_base: Option<&str>,
        quality: ImageQuality,
    ) -> CatalogResult<Option<Arc<ImageBlob>>> {
        let Some(base) = image_base else {
            return Ok(None);
        };
        let url = self.endpoints.image_url(base, quality)?;
        self.get_image(url.as_str()).await.map(Some)
    }

    /// List thumbnail for a record. Failures are logged, not returned.
    pub async fn thumbnail(&self, record: &CatalogRecord) -> Option<Arc<ImageBlob>> {
        match self
            .image_for(record.image_base_url.as_deref(), ImageQuality::Low)
            .await
        {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("Failed to fetch thumbnail for {}: {}", record.id, e);
                None
            }
        }
    }

    pub fn clear_image_cache(&self) {
        self.images.clear();
    }

    /// Drop the persisted record collection
    pub fn clear_catalog_cache(&self) -> StoreResult<()> {
        self.store.remove(&self.records_key)
    }

    pub fn image_cache_stats(&self) -> CacheStats {
        self.images.stats()
    }
}

/// Replace the persisted collection from the blocking pool
async fn persist_snapshot<S: KeyValueStore>(store: Arc<S>, key: String, records: Vec<CatalogRecord>) {
    let write = tokio::task::spawn_blocking(move || save_records(&*store, &key, &records));
    if let Err(e) = write.await {
        log::warn!("Record cache write did not complete: {}", e);
    }
}

impl<T: Transport, S: KeyValueStore> CatalogSource for CatalogService<T, S> {
    fn catalog_list(&self) -> impl Future<Output = CatalogResult<Vec<CatalogRecord>>> + Send {
        self.get_catalog_list()
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
