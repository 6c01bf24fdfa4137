use crate::cache::store::KeyValueStore;
use crate::models::CatalogRecord;

/// Load the persisted record collection.
///
/// A missing, unreadable or undecodable value is a miss; the latter two are
/// logged.
pub fn load_records<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<Vec<CatalogRecord>> {
    let bytes = match store.load(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read record cache, ignoring it: {}", e);
            return None;
        }
    };

    match serde_json::from_slice::<Vec<CatalogRecord>>(&bytes) {
        Ok(records) => Some(records),
        Err(e) => {
            log::warn!("Failed to parse record cache, ignoring it: {}", e);
            None
        }
    }
}

/// Replace the persisted record collection.
///
/// The collection is encoded as a whole before anything is written, so an
/// encode failure leaves the previous value in place. Failures are logged and
/// reported as `false`.
pub fn save_records<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    records: &[CatalogRecord],
) -> bool {
    let bytes = match serde_json::to_vec(records) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Failed to encode {} records: {}", records.len(), e);
            return false;
        }
    };

    match store.store(key, &bytes) {
        Ok(()) => {
            log::info!("{} card records cached", records.len());
            true
        }
        Err(e) => {
            log::warn!("Failed to save record cache: {}", e);
            false
        }
    }
}
