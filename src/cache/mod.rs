// Cache module: the read-through cache core.
// Freshness policy, two-tier store, fetch coordination, and mutation application.

pub mod apply;
pub mod entry;
pub mod facade;
pub mod flight;
pub mod freshness;
pub mod store;

pub use entry::{CacheEntry, Entity};
pub use facade::{CacheStats, ResourceCache, TierStats};
pub use flight::{FetchCoordinator, FetchFailure};
pub use store::CacheStore;
