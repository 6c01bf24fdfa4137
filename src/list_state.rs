//! Record list with client-side search
//!
//! Holds the records of one list screen and derives the displayed set from the
//! full list and the active filter. Mutations emit a `DataChanged` event on a
//! single-consumer channel; notifications that pile up before the consumer reads
//! them coalesce into one.

use crate::error::CatalogResult;
use crate::models::CatalogRecord;
use crate::service::CatalogSource;
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

/// Message shown when the displayed set is empty
pub const EMPTY_LIST_MESSAGE: &str = "No cards found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    DataChanged,
}

/// Receiving half of the list's notifications
#[derive(Debug)]
pub struct ListEvents {
    rx: mpsc::Receiver<ListEvent>,
}

impl ListEvents {
    /// Wait for the next notification; `None` once the list state is dropped
    pub async fn changed(&mut self) -> Option<ListEvent> {
        self.rx.recv().await
    }

    /// Pending notification, if any, without waiting
    pub fn try_next(&mut self) -> Option<ListEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Borrowed snapshot of what to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<'a> {
    pub records: &'a [CatalogRecord],
    pub query: &'a str,
    pub is_searching: bool,
    /// Message to show instead of rows, when there are none
    pub empty_message: Option<&'static str>,
}

#[derive(Debug)]
pub struct CatalogListState {
    all_records: Vec<CatalogRecord>,
    filtered_records: Vec<CatalogRecord>,
    query: String,
    /// Set while a non-empty query is active. Distinguishes "no matches" from
    /// "no search", since both leave `filtered_records` empty.
    is_searching: bool,
    events: mpsc::Sender<ListEvent>,
}

impl CatalogListState {
    pub fn new() -> (Self, ListEvents) {
        let (tx, rx) = mpsc::channel(1);
        let state = Self {
            all_records: Vec::new(),
            filtered_records: Vec::new(),
            query: String::new(),
            is_searching: false,
            events: tx,
        };
        (state, ListEvents { rx })
    }

    /// Reload from `source`, clear any search and notify.
    ///
    /// On error the state is left as it was and nothing is emitted.
    pub async fn refresh<C: CatalogSource>(&mut self, source: &C) -> CatalogResult<()> {
        let records = source.catalog_list().await?;
        self.replace_records(records);
        Ok(())
    }

    /// Replace the full record set, clearing any active search
    pub fn replace_records(&mut self, records: Vec<CatalogRecord>) {
        self.all_records = records;
        self.filtered_records.clear();
        self.query.clear();
        self.is_searching = false;
        self.notify();
    }

    /// Filter by name, case-insensitively, keeping list order
    pub fn search(&mut self, query: &str) {
        self.is_searching = !query.is_empty();
        self.query = query.to_string();
        self.filtered_records = if self.is_searching {
            filter_by_name(&self.all_records, query)
        } else {
            Vec::new()
        };

        log::debug!(
            "Search {:?} matched {} of {} records",
            query,
            self.filtered_records.len(),
            self.all_records.len()
        );
        self.notify();
    }

    /// Records currently shown: the filter result while searching, else all
    pub fn displayed(&self) -> &[CatalogRecord] {
        if self.is_searching {
            &self.filtered_records
        } else {
            &self.all_records
        }
    }

    pub fn item_count(&self) -> usize {
        self.displayed().len()
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    /// Bounds-checked read into the displayed set
    pub fn record_at(&self, index: isize) -> Option<&CatalogRecord> {
        let record = usize::try_from(index)
            .ok()
            .and_then(|i| self.displayed().get(i));
        if record.is_none() {
            log::debug!("Index {} out of bounds for displayed records", index);
        }
        record
    }

    /// Id carried by a selection of the row at `index`
    pub fn selected_id(&self, index: isize) -> Option<&str> {
        self.record_at(index).map(|record| record.id.as_str())
    }

    pub fn view(&self) -> ListView<'_> {
        let records = self.displayed();
        ListView {
            records,
            query: &self.query,
            is_searching: self.is_searching,
            empty_message: records.is_empty().then_some(EMPTY_LIST_MESSAGE),
        }
    }

    fn notify(&self) {
        match self.events.try_send(ListEvent::DataChanged) {
            Ok(()) => {}
            // A change is already pending; the consumer will see it once
            Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Closed(_)) => log::debug!("List events receiver dropped"),
        }
    }
}

/// Order-preserving subsequence of `records` whose name contains `query`,
/// ignoring case
pub fn filter_by_name(records: &[CatalogRecord], query: &str) -> Vec<CatalogRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "list_state_tests.rs"]
mod tests;
