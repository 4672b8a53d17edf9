// Cached snapshot wrapper and the record identity contract.
// A snapshot is always complete; partial payloads are never stored.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::freshness;

/// Contract every cacheable record satisfies.
///
/// `id` is the one declared identity field used for update and delete
/// matching; everything else about a record is opaque to the cache.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Stable identity for mutation matching.
    fn id(&self) -> u64;

    /// Fields scanned by the facade's substring search.
    fn search_fields(&self) -> Vec<&str>;
}

/// One complete snapshot of a resource with its capture instant.
///
/// Serialized wholesale into the durable tier, so freshness survives a
/// process restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The records as fetched or last mutated.
    pub payload: Vec<T>,
    /// When the payload was captured.
    pub captured_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Wrap a payload captured at `captured_at`.
    pub fn new(payload: Vec<T>, captured_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            captured_at,
        }
    }

    /// Whether this snapshot is past its TTL at `now`.
    pub fn is_stale(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        freshness::is_stale(Some(self.captured_at), ttl, now)
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_staleness_follows_capture_instant() {
        let captured = Utc::now();
        let entry = CacheEntry::new(vec![1, 2, 3], captured);

        let ttl = Duration::from_secs(300);
        assert!(!entry.is_stale(ttl, captured + chrono::Duration::seconds(299)));
        assert!(entry.is_stale(ttl, captured + chrono::Duration::seconds(300)));
        assert_eq!(entry.len(), 3);
    }
}
