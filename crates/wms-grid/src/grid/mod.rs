//! Split grid modules for RecordGrid
//
// This module contains the `RecordGrid` struct (fields, construction and
// read accessors) and declares submodules that implement the intents:
// searching and filtering, sorting, selection, pending edit/delete,
// notifications, quantities and paging.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use indexmap::{IndexMap, IndexSet};
use wms_core::{GridRecord, Record, Result};
use wms_settings::GridSettings;

use crate::config::GridConfig;
use crate::events::GridEvent;
use crate::filter_types::{FilterPredicate, SortState};
use crate::notification::{Clock, Notification, SystemClock};

pub mod types;
mod filtering;
mod sort;
mod selection;
mod pending;
mod notifications;
mod quantities;
mod pagination;


pub use types::*;

/// Interactive record grid
///
/// Holds the baseline records of one table together with the view state a
/// user builds up on top of them. Visible rows are recomputed from that state
/// on every read; the baseline only changes when an edit or delete is
/// committed.
#[derive(Debug)]
pub struct RecordGrid<R: GridRecord = Record> {
    config: GridConfig,

    /// Baseline records in their original order
    records: Vec<R>,

    /// Search term as typed
    search_term: String,

    /// Lowercased search term used for matching
    search_lower: String,

    /// Active filters by field name, in the order they were set
    filters: IndexMap<String, FilterPredicate>,

    sort: SortState,

    /// Selected keys in selection order
    selection: IndexSet<String>,

    pending: PendingAction<R>,

    notification: Option<Notification>,
    notification_ttl: Duration,

    /// Stepper values keyed by record key
    quantities: HashMap<String, u32>,

    page_size: Option<usize>,
    page: usize,

    /// Committed changes waiting to be collected
    events: Vec<GridEvent<R>>,

    clock: Arc<dyn Clock>,
}

impl<R: GridRecord> RecordGrid<R> {
    /// Build a grid over `records`.
    ///
    /// Fails only when the configuration is inconsistent. Records whose
    /// identity key renders blank are dropped with a warning.
    pub fn new(records: Vec<R>, config: GridConfig, settings: &GridSettings) -> Result<Self> {
        config.validate()?;

        let mut admitted = Vec::with_capacity(records.len());
        let mut quantities = HashMap::with_capacity(records.len());
        for record in records {
            let key = config.key_of(&record);
            if config
                .identity
                .iter()
                .all(|field| record.rendered(field).trim().is_empty())
            {
                tracing::warn!("Rejected record with blank identity key: {:?}", record);
                continue;
            }
            if quantities.insert(key.clone(), 0).is_some() {
                tracing::warn!("Duplicate record key '{}', first record wins", key);
            }
            admitted.push(record);
        }

        tracing::debug!(
            "Record grid created with {} records over {} fields",
            admitted.len(),
            config.fields.len()
        );

        Ok(Self {
            config,
            records: admitted,
            search_term: String::new(),
            search_lower: String::new(),
            filters: IndexMap::new(),
            sort: SortState::Unsorted,
            selection: IndexSet::new(),
            pending: PendingAction::Idle,
            notification: None,
            notification_ttl: settings.notification_ttl(),
            quantities,
            page_size: settings.effective_page_size(),
            page: 0,
            events: Vec::new(),
            clock: Arc::new(SystemClock),
        })
    }

    /// Use a different time source for notification expiry
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Baseline records in their original order
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of baseline records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a baseline record by key
    pub fn record(&self, key: &str) -> Option<&R> {
        self.position(key).map(|ix| &self.records[ix])
    }

    /// Check whether a key belongs to a baseline record
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Identity key of a record under this grid's configuration
    pub fn key_of(&self, record: &R) -> String {
        self.config.key_of(record)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Active filters by field, in the order they were set
    pub fn active_filters(&self) -> &IndexMap<String, FilterPredicate> {
        &self.filters
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn pending(&self) -> &PendingAction<R> {
        &self.pending
    }

    /// Current notification, hidden once its lifetime has passed on the
    /// grid's clock even before `tick` clears the slot
    pub fn notification(&self) -> Option<&Notification> {
        let now = self.clock.now();
        self.notification
            .as_ref()
            .filter(|notification| !notification.is_expired(now))
    }

    /// Take the queued change events
    pub fn drain_events(&mut self) -> Vec<GridEvent<R>> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot of everything a renderer needs
    pub fn view(&self) -> GridView<R> {
        let visible = self.visible_indices();
        let page = self.page_info(visible.len());
        let rows = self
            .page_slice(&visible, &page)
            .iter()
            .map(|ix| self.records[*ix].clone())
            .collect();

        GridView {
            rows,
            visible_count: visible.len(),
            total_count: self.records.len(),
            page,
            search_term: self.search_term.clone(),
            filters: self
                .filters
                .iter()
                .map(|(field, predicate)| (field.clone(), predicate.option()))
                .collect(),
            sort: self.sort.clone(),
            selection: self.selection.iter().cloned().collect(),
            pending: self.pending.clone(),
            notification: self.notification().cloned(),
        }
    }

    /// Index of the first baseline record with this key
    fn position(&self, key: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| self.config.key_of(record) == key)
    }

    /// Remove a record and everything keyed by it
    fn remove_record(&mut self, key: &str) -> Option<R> {
        let ix = self.position(key)?;
        let record = self.records.remove(ix);
        if !self.contains_key(key) {
            self.selection.shift_remove(key);
            self.quantities.remove(key);
        }
        Some(record)
    }
}
