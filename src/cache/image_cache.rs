//! In-memory image cache with LRU eviction
//!
//! Images are keyed by the exact URL string they were fetched from. The cache is
//! bounded both by entry count and by total bytes; inserting past either bound
//! evicts least recently used entries first.

use crate::config::ImageCacheConfig;
use crate::models::ImageBlob;
use lru::LruCache;
use std::sync::{Arc, Mutex, MutexGuard};

/// Statistics about cache usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub bytes_used: usize,
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped to stay within the configured bounds
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate the cache hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheState {
    /// Entry count is bounded here, not by the `LruCache` capacity, so that
    /// byte accounting sees every eviction
    images: LruCache<String, Arc<ImageBlob>>,
    bytes_used: usize,
    stats: CacheStats,
}

impl CacheState {
    fn remove(&mut self, url: &str) -> Option<Arc<ImageBlob>> {
        let blob = self.images.pop(url)?;
        self.bytes_used = self.bytes_used.saturating_sub(blob.memory_size());
        Some(blob)
    }

    fn evict_lru(&mut self) -> bool {
        match self.images.pop_lru() {
            Some((url, blob)) => {
                self.bytes_used = self.bytes_used.saturating_sub(blob.memory_size());
                self.stats.evictions += 1;
                log::debug!("Evicted image {}", url);
                true
            }
            None => false,
        }
    }

    fn sync_stats(&mut self) {
        self.stats.entries = self.images.len();
        self.stats.bytes_used = self.bytes_used;
    }
}

pub struct ImageCache {
    config: ImageCacheConfig,
    state: Mutex<CacheState>,
}

impl ImageCache {
    pub fn new(config: ImageCacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState {
                images: LruCache::unbounded(),
                bytes_used: 0,
                stats: CacheStats::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get a cached image and mark it as most recently used
    pub fn get(&self, url: &str) -> Option<Arc<ImageBlob>> {
        let mut state = self.lock();
        match state.images.get(url).cloned() {
            Some(blob) => {
                state.stats.hits += 1;
                Some(blob)
            }
            None => {
                state.stats.misses += 1;
                None
            }
        }
    }

    /// Store an image under its URL, evicting as needed.
    ///
    /// An image larger than the whole byte budget is not cached.
    pub fn insert(&self, blob: Arc<ImageBlob>) {
        let size = blob.memory_size();
        if size > self.config.max_bytes || self.config.max_entries == 0 {
            log::debug!("Image {} ({} bytes) exceeds cache budget", blob.url, size);
            return;
        }

        let mut state = self.lock();
        state.remove(&blob.url);

        while state.images.len() + 1 > self.config.max_entries
            || state.bytes_used + size > self.config.max_bytes
        {
            if !state.evict_lru() {
                break;
            }
        }

        state.images.put(blob.url.clone(), blob);
        state.bytes_used += size;
        state.sync_stats();
    }

    pub fn remove(&self, url: &str) -> Option<Arc<ImageBlob>> {
        let mut state = self.lock();
        let removed = state.remove(url);
        state.sync_stats();
        removed
    }

    /// Membership check that leaves the recency order alone
    pub fn contains(&self, url: &str) -> bool {
        self.lock().images.contains(url)
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.images.clear();
        state.bytes_used = 0;
        state.sync_stats();
    }

    pub fn len(&self) -> usize {
        self.lock().images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(ImageCacheConfig::default())
    }
}
