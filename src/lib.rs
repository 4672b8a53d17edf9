//! Client-side read-through cache and request coordination for the
//! stockroom back office.
//!
//! High-traffic reference data (the inventory catalog, the delivery
//! roster) is served from a two-tier local cache: a fast in-process tier
//! mirrored into durable storage. Reads go through a per-resource
//! [`ResourceCache`], which coalesces concurrent refreshes into a single
//! network call, retries with a bounded ceiling, and degrades to the last
//! good snapshot when the backend is unreachable. Server-confirmed writes
//! are applied to the cached snapshot directly, so readers see them
//! without a round trip.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod store;

pub use api::{ApiClient, Courier, CourierSource, Product, ProductSource, RecordSource};
pub use cache::{CacheEntry, CacheStats, Entity, ResourceCache, TierStats};
pub use config::ResourceConfig;
pub use error::{Result, StockroomError};
pub use store::{FileStore, MemoryStore, StorageAdapter};

use std::sync::Arc;

/// Build the standard inventory-catalog cache over `client` and `durable`.
pub fn product_cache(
    client: Arc<ApiClient>,
    durable: Arc<dyn StorageAdapter>,
) -> ResourceCache<Product> {
    ResourceCache::new(
        "products",
        ResourceConfig::catalog(),
        Arc::new(ProductSource::new(client)),
        durable,
    )
}

/// Build the standard delivery-roster cache over `client` and `durable`.
pub fn courier_cache(
    client: Arc<ApiClient>,
    durable: Arc<dyn StorageAdapter>,
) -> ResourceCache<Courier> {
    ResourceCache::new(
        "couriers",
        ResourceConfig::roster(),
        Arc::new(CourierSource::new(client)),
        durable,
    )
}
