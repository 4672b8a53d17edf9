// Read-through cache facade for a single resource.
// Serves fresh snapshots locally, coordinates refreshes, and degrades to
// stale data when the backend is unreachable.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::api::RecordSource;
use crate::config::ResourceConfig;
use crate::error::Result;
use crate::store::StorageAdapter;

use super::apply;
use super::entry::{CacheEntry, Entity};
use super::flight::FetchCoordinator;
use super::store::CacheStore;

/// Diagnostic snapshot of one cache tier.
#[derive(Debug, Clone)]
pub struct TierStats {
    /// Records currently held in this tier.
    pub size: usize,
    /// Whether the tier's snapshot is within its TTL.
    pub fresh: bool,
    /// When the tier's snapshot was captured.
    pub captured_at: Option<DateTime<Utc>>,
}

/// Diagnostic snapshot across both tiers.
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub fast: TierStats,
    pub durable: TierStats,
    pub config: ResourceConfig,
}

/// Entry point callers use for one cached resource.
///
/// Composes the cache store, freshness policy, fetch coordinator, and
/// mutation application behind a single read-through [`get`](Self::get).
/// Owns its store exclusively; construct one facade per resource and share
/// it.
pub struct ResourceCache<T: Entity> {
    config: ResourceConfig,
    store: CacheStore<T>,
    coordinator: FetchCoordinator<T>,
    source: Arc<dyn RecordSource<T>>,
}

impl<T: Entity> ResourceCache<T> {
    /// Create a cache for `key`, fetching through `source` and persisting
    /// through `durable`.
    pub fn new(
        key: impl Into<String>,
        config: ResourceConfig,
        source: Arc<dyn RecordSource<T>>,
        durable: Arc<dyn StorageAdapter>,
    ) -> Self {
        let key = key.into();
        Self {
            coordinator: FetchCoordinator::new(key.clone(), &config),
            store: CacheStore::new(key, durable),
            config,
            source,
        }
    }

    /// Current records for this resource.
    ///
    /// Serves from cache while fresh; otherwise refreshes through the
    /// single-flight coordinator. When a refresh fails and any prior
    /// snapshot exists, that snapshot is returned as a degraded result;
    /// only a failure with no prior data surfaces as an error.
    pub async fn get(&self, force_refresh: bool) -> Result<Vec<T>> {
        if !force_refresh {
            match self.store.read() {
                Some(entry) if !entry.is_stale(self.config.ttl, Utc::now()) => {
                    debug!(key = %self.store.key(), size = entry.len(), "cache hit");
                    return Ok(entry.payload);
                }
                Some(_) => debug!(key = %self.store.key(), "cache stale, refreshing"),
                None => debug!(key = %self.store.key(), "cache miss, fetching"),
            }
        }

        match self.coordinator.fetch(Arc::clone(&self.source)).await {
            Ok(records) => {
                self.store.write(records.clone(), Utc::now());
                Ok(records)
            }
            Err(failure) => match self.store.read() {
                Some(entry) => {
                    warn!(
                        key = %self.store.key(),
                        attempts = failure.attempts,
                        "refresh failed, serving stale snapshot"
                    );
                    Ok(entry.payload)
                }
                None => Err(failure.into()),
            },
        }
    }

    /// Case-insensitive substring search over the cached records.
    ///
    /// Scans each record's declared search fields. Returns a filtered
    /// view; the cache itself is untouched.
    pub async fn search(&self, term: &str) -> Result<Vec<T>> {
        let records = self.get(false).await?;
        let needle = term.to_lowercase();

        Ok(records
            .into_iter()
            .filter(|record| {
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Record a server-confirmed create.
    ///
    /// Prepended so the newest record lists first. No-op when nothing is
    /// cached yet; the next full fetch will include it.
    pub fn record_inserted(&self, record: T) {
        if let Some(entry) = self.store.read() {
            let payload = apply::insert(&entry.payload, record);
            self.store.write(payload, Utc::now());
        }
    }

    /// Record a server-confirmed update by identity.
    ///
    /// `patch` holds the replaced fields; everything else on the matching
    /// record is kept. No-op when nothing is cached yet.
    pub fn record_updated(&self, id: u64, patch: &Map<String, Value>) -> Result<()> {
        if let Some(entry) = self.store.read() {
            let payload = apply::update(&entry.payload, id, patch)?;
            self.store.write(payload, Utc::now());
        }
        Ok(())
    }

    /// Record a server-confirmed delete by identity. No-op when nothing is
    /// cached yet.
    pub fn record_removed(&self, id: u64) {
        if let Some(entry) = self.store.read() {
            let payload = apply::remove(&entry.payload, id);
            self.store.write(payload, Utc::now());
        }
    }

    /// Clear both cache tiers. The next [`get`](Self::get) always fetches.
    pub fn invalidate(&self) {
        self.store.invalidate();
    }

    /// Read-only diagnostics across both tiers. Never touches the network.
    pub fn stats(&self) -> CacheStats {
        let now = Utc::now();
        CacheStats {
            fast: self.tier_stats(self.store.read_fast(), now),
            durable: self.tier_stats(self.store.read_durable(), now),
            config: self.config.clone(),
        }
    }

    fn tier_stats(&self, entry: Option<CacheEntry<T>>, now: DateTime<Utc>) -> TierStats {
        match entry {
            Some(entry) => TierStats {
                size: entry.len(),
                fresh: !entry.is_stale(self.config.ttl, now),
                captured_at: Some(entry.captured_at),
            },
            None => TierStats {
                size: 0,
                fresh: false,
                captured_at: None,
            },
        }
    }
}
