// Fetch coordination.
// Shares one in-flight remote fetch per resource and retries with a bounded ceiling.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::api::RecordSource;
use crate::config::ResourceConfig;
use crate::error::StockroomError;

use super::entry::Entity;

/// Terminal failure of one logical fetch, after all retry attempts.
///
/// Cloneable so every caller joined to the same flight observes it.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    /// Remote calls issued before giving up.
    pub attempts: u32,
    /// Message of the last underlying error.
    pub message: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetch failed after {} attempts: {}",
            self.attempts, self.message
        )
    }
}

impl From<FetchFailure> for StockroomError {
    fn from(failure: FetchFailure) -> Self {
        StockroomError::FetchFailed {
            attempts: failure.attempts,
            message: failure.message,
        }
    }
}

type FlightResult<T> = Result<Vec<T>, FetchFailure>;
type SharedFlight<T> = Shared<BoxFuture<'static, FlightResult<T>>>;

/// Issues remote fetches for one resource, guaranteeing at most one
/// in-flight fetch at a time.
///
/// Callers arriving while a fetch is pending join it and observe its
/// settlement, success or failure. The slot is cleared before the result
/// becomes observable, so a failed fetch never blocks the next attempt.
pub struct FetchCoordinator<T: Entity> {
    key: String,
    max_attempts: u32,
    retry_delay: Duration,
    in_flight: Arc<Mutex<Option<SharedFlight<T>>>>,
}

impl<T: Entity> FetchCoordinator<T> {
    /// Create a coordinator for `key` with the resource's retry settings.
    pub fn new(key: impl Into<String>, config: &ResourceConfig) -> Self {
        Self {
            key: key.into(),
            max_attempts: config.attempts(),
            retry_delay: config.retry_delay,
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Fetch through `source`, joining the pending flight if one exists.
    pub async fn fetch(&self, source: Arc<dyn RecordSource<T>>) -> FlightResult<T> {
        let flight = {
            let mut slot = self.in_flight.lock().unwrap();
            if let Some(flight) = slot.as_ref() {
                debug!(key = %self.key, "joining in-flight fetch");
                flight.clone()
            } else {
                let flight = Self::run(
                    self.key.clone(),
                    source,
                    self.max_attempts,
                    self.retry_delay,
                    Arc::clone(&self.in_flight),
                )
                .boxed()
                .shared();
                *slot = Some(flight.clone());
                flight
            }
        };

        flight.await
    }

    /// Drive one logical fetch: a bounded retry loop over the source.
    async fn run(
        key: String,
        source: Arc<dyn RecordSource<T>>,
        max_attempts: u32,
        retry_delay: Duration,
        slot: Arc<Mutex<Option<SharedFlight<T>>>>,
    ) -> FlightResult<T> {
        let mut result = Err(FetchFailure {
            attempts: 0,
            message: "fetch never attempted".to_string(),
        });

        for attempt in 1..=max_attempts {
            match source.fetch().await {
                Ok(records) => {
                    debug!(key = %key, attempt, count = records.len(), "fetch succeeded");
                    result = Ok(records);
                    break;
                }
                Err(err) => {
                    warn!(key = %key, attempt, max_attempts, %err, "fetch attempt failed");
                    result = Err(FetchFailure {
                        attempts: attempt,
                        message: err.to_string(),
                    });
                    if attempt < max_attempts {
                        sleep(retry_delay).await;
                    }
                }
            }
        }

        // Clear the slot before any caller observes the result, so the next
        // fetch for this key starts a fresh flight.
        slot.lock().unwrap().take();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Product;
    use crate::error::Result;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn product(id: u64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            code: format!("P-{id:04}"),
            barcode: None,
            unit_price: 1.0,
            stock: 0,
            supplier_id: None,
            updated_at: None,
        }
    }

    enum Outcome {
        Records(Vec<Product>),
        Fail(&'static str),
    }

    /// Source that replays a script of outcomes, counting calls.
    struct ScriptedSource {
        calls: AtomicU32,
        script: Mutex<VecDeque<Outcome>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Outcome>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                script: Mutex::new(script.into()),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecordSource<Product> for ScriptedSource {
        async fn fetch(&self) -> Result<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Suspend so concurrent callers can pile onto this flight.
            tokio::task::yield_now().await;
            match self.script.lock().unwrap().pop_front() {
                Some(Outcome::Records(records)) => Ok(records),
                Some(Outcome::Fail(message)) => Err(StockroomError::Other(message.to_string())),
                None => Err(StockroomError::Other("script exhausted".to_string())),
            }
        }
    }

    fn coordinator(max_attempts: u32) -> FetchCoordinator<Product> {
        let config = ResourceConfig {
            max_attempts,
            ..ResourceConfig::default()
        };
        FetchCoordinator::new("products", &config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_fetches_share_one_flight() {
        let source = ScriptedSource::new(vec![Outcome::Records(vec![product(1, "Hammer")])]);
        let coordinator = coordinator(3);

        let (a, b, c) = tokio::join!(
            coordinator.fetch(source.clone() as _),
            coordinator.fetch(source.clone() as _),
            coordinator.fetch(source.clone() as _),
        );

        assert_eq!(source.calls(), 1);
        assert_eq!(a.unwrap().len(), 1);
        assert_eq!(b.unwrap().len(), 1);
        assert_eq!(c.unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_joined_callers_share_the_failure() {
        let source = ScriptedSource::new(vec![
            Outcome::Fail("503"),
            Outcome::Fail("503"),
            Outcome::Fail("503"),
        ]);
        let coordinator = coordinator(3);

        let (a, b) = tokio::join!(
            coordinator.fetch(source.clone() as _),
            coordinator.fetch(source.clone() as _),
        );

        assert_eq!(source.calls(), 3);
        assert_eq!(a.unwrap_err().attempts, 3);
        assert_eq!(b.unwrap_err().attempts, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_up_to_ceiling_then_succeeds() {
        let source = ScriptedSource::new(vec![
            Outcome::Fail("timeout"),
            Outcome::Fail("timeout"),
            Outcome::Records(vec![product(1, "Hammer")]),
        ]);
        let coordinator = coordinator(3);

        let records = coordinator.fetch(source.clone() as _).await.unwrap();
        assert_eq!(source.calls(), 3);
        assert_eq!(records[0].id, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_wedge_the_key() {
        let source = ScriptedSource::new(vec![
            Outcome::Fail("down"),
            Outcome::Fail("down"),
            Outcome::Records(vec![product(1, "Hammer")]),
        ]);
        let coordinator = coordinator(1);

        // First flight exhausts its single attempt and fails.
        let failure = coordinator.fetch(source.clone() as _).await.unwrap_err();
        assert_eq!(failure.attempts, 1);
        assert!(failure.message.contains("down"));

        // The slot was cleared, so new fetches start new flights.
        assert!(coordinator.fetch(source.clone() as _).await.is_err());
        assert!(coordinator.fetch(source.clone() as _).await.is_ok());
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_issues_no_retry_delay() {
        let source = ScriptedSource::new(vec![Outcome::Records(vec![])]);
        let coordinator = coordinator(3);

        let started = tokio::time::Instant::now();
        coordinator.fetch(source as _).await.unwrap();
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
