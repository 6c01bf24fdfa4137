//! Shared fakes for unit tests.

use crate::api::{HttpResponse, Transport};
use crate::cache::{KeyValueStore, MemoryStore};
use crate::error::{CatalogError, CatalogResult, StoreResult};
use crate::models::CatalogRecord;
use reqwest::Url;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Encode a solid-colour PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn record(id: &str, name: &str) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        local_id: id.to_string(),
        name: name.to_string(),
        image_base_url: None,
    }
}

pub fn records_json(records: &[CatalogRecord]) -> Vec<u8> {
    serde_json::to_vec(records).unwrap()
}

/// One scripted reply
pub enum Reply {
    Ok(HttpResponse),
    Fail(&'static str),
}

/// In-process transport with scripted replies per URL.
///
/// One-shot replies queued with [`FakeTransport::script`] are consumed first;
/// afterwards the sticky reply from [`FakeTransport::respond`] is used, and a
/// URL with neither fails as a transport error.
#[derive(Default)]
pub struct FakeTransport {
    scripted: Mutex<HashMap<String, VecDeque<Reply>>>,
    sticky: Mutex<HashMap<String, HttpResponse>>,
    calls: Mutex<Vec<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request waits for a permit on the returned semaphore
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let transport = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (transport, gate)
    }

    pub fn respond(&self, url: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.sticky
            .lock()
            .unwrap()
            .insert(url.to_string(), HttpResponse::new(status, body));
    }

    pub fn script(&self, url: &str, replies: Vec<Reply>) {
        self.scripted
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .extend(replies);
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == url).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_reply(&self, url: &str) -> CatalogResult<HttpResponse> {
        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|queue| queue.pop_front());

        match scripted {
            Some(Reply::Ok(response)) => Ok(response),
            Some(Reply::Fail(reason)) => Err(CatalogError::transport(reason)),
            None => self
                .sticky
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| CatalogError::transport(format!("no route for {url}"))),
        }
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &Url) -> CatalogResult<HttpResponse> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.next_reply(url.as_str())
    }
}

/// Memory store that counts writes
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for CountingStore {
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.inner.load(key)
    }

    fn store(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.store(key, bytes)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

/// Poll `check` until it holds, failing the test after two seconds
pub async fn eventually(mut check: impl FnMut() -> bool) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 2s");
}
