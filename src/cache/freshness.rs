// Freshness policy.
// Pure verdict mapping a capture instant and TTL to fresh or stale.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Whether a snapshot captured at `captured_at` is stale at `now`.
///
/// A never-captured snapshot is always stale. Elapsed time equal to the
/// TTL already counts as stale. Staleness only disqualifies a snapshot as
/// a first-choice answer; it stays eligible as a degraded fallback.
pub fn is_stale(captured_at: Option<DateTime<Utc>>, ttl: Duration, now: DateTime<Utc>) -> bool {
    let Some(captured_at) = captured_at else {
        return true;
    };

    // A capture instant in the future reads as elapsed zero.
    let elapsed = now
        .signed_duration_since(captured_at)
        .to_std()
        .unwrap_or(Duration::ZERO);

    elapsed >= ttl
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_never_captured_is_stale() {
        assert!(is_stale(None, TTL, Utc::now()));
    }

    #[test]
    fn test_fresh_within_ttl() {
        let captured = Utc::now();
        let read_at = captured + chrono::Duration::seconds(299);
        assert!(!is_stale(Some(captured), TTL, read_at));
    }

    #[test]
    fn test_stale_at_exact_ttl_boundary() {
        let captured = Utc::now();
        let read_at = captured + chrono::Duration::seconds(300);
        assert!(is_stale(Some(captured), TTL, read_at));
    }

    #[test]
    fn test_stale_past_ttl() {
        let captured = Utc::now();
        let read_at = captured + chrono::Duration::seconds(301);
        assert!(is_stale(Some(captured), TTL, read_at));
    }

    #[test]
    fn test_future_capture_reads_fresh() {
        let captured = Utc::now() + chrono::Duration::seconds(60);
        assert!(!is_stale(Some(captured), TTL, Utc::now()));
    }

    #[test]
    fn test_zero_ttl_is_always_stale() {
        let captured = Utc::now();
        assert!(is_stale(Some(captured), Duration::ZERO, captured));
    }
}
