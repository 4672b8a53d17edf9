// Two-tier cache store.
// Fast in-process tier backed by a durable key/value mirror; never touches the network.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::store::StorageAdapter;

use super::entry::{CacheEntry, Entity};

/// Holder for one resource's current snapshot across both tiers.
///
/// The owning facade is the only writer. Durable-tier failures degrade to
/// "no durable data": the fast tier stays authoritative for the rest of
/// the process lifetime.
pub struct CacheStore<T> {
    key: String,
    fast: Mutex<Option<CacheEntry<T>>>,
    durable: Arc<dyn StorageAdapter>,
}

impl<T: Entity> CacheStore<T> {
    /// Create an empty store for `key`, mirrored through `durable`.
    pub fn new(key: impl Into<String>, durable: Arc<dyn StorageAdapter>) -> Self {
        Self {
            key: key.into(),
            fast: Mutex::new(None),
            durable,
        }
    }

    /// Resource key this store serves.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current snapshot, if any.
    ///
    /// Checks the fast tier first; on a miss, hydrates it from the durable
    /// tier and returns that.
    pub fn read(&self) -> Option<CacheEntry<T>> {
        let mut fast = self.fast.lock().unwrap();
        if fast.is_none() {
            *fast = self.read_durable();
        }
        fast.clone()
    }

    /// Snapshot currently held in the fast tier, without hydrating.
    pub fn read_fast(&self) -> Option<CacheEntry<T>> {
        self.fast.lock().unwrap().clone()
    }

    /// Snapshot currently persisted in the durable tier, bypassing the
    /// fast tier. Used for diagnostics.
    pub fn read_durable(&self) -> Option<CacheEntry<T>> {
        match self.durable.get(&self.key) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(key = %self.key, %err, "corrupt durable cache entry, ignoring");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(key = %self.key, %err, "durable cache tier read failed");
                None
            }
        }
    }

    /// Replace the snapshot in both tiers.
    pub fn write(&self, payload: Vec<T>, captured_at: DateTime<Utc>) {
        let entry = CacheEntry::new(payload, captured_at);
        self.write_durable(&entry);
        *self.fast.lock().unwrap() = Some(entry);
    }

    /// Clear both tiers. An in-flight fetch is unaffected and may
    /// repopulate the store when it settles.
    pub fn invalidate(&self) {
        *self.fast.lock().unwrap() = None;
        if let Err(err) = self.durable.remove(&self.key) {
            warn!(key = %self.key, %err, "failed to clear durable cache tier");
        }
    }

    fn write_durable(&self, entry: &CacheEntry<T>) {
        let value = match serde_json::to_value(entry) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %self.key, %err, "failed to serialize cache entry");
                return;
            }
        };

        if let Err(err) = self.durable.set(&self.key, &value) {
            warn!(key = %self.key, %err, "durable cache tier write failed");
        }
    }
}
