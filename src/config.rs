// Per-resource cache configuration.
// TTL, retry ceiling, and retry delay are static for the lifetime of a facade.

use std::time::Duration;

/// TTL for bulk catalog data (products): 5 minutes.
pub const CATALOG_TTL: Duration = Duration::from_secs(5 * 60);

/// TTL for slow-changing roster data (couriers): 10 minutes.
pub const ROSTER_TTL: Duration = Duration::from_secs(10 * 60);

/// Configuration for one cached resource.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    /// How long a snapshot counts as fresh.
    pub ttl: Duration,
    /// Maximum number of remote calls per logical fetch.
    pub max_attempts: u32,
    /// Fixed delay between retry attempts.
    pub retry_delay: Duration,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            ttl: CATALOG_TTL,
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl ResourceConfig {
    /// Settings for bulk catalog data (inventory products).
    pub fn catalog() -> Self {
        Self::default()
    }

    /// Settings for slow-changing roster data (delivery couriers).
    pub fn roster() -> Self {
        Self {
            ttl: ROSTER_TTL,
            ..Self::default()
        }
    }

    /// Retry ceiling, never below one attempt.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}
