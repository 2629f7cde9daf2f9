//! Rate-limited executor
//!
//! Gates arbitrary units of work behind a minimum inter-call spacing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bridge_traits::time::{Clock, Sleeper, SystemClock, TokioSleeper};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Result, ThrottleError};

/// Default floor between call starts: 100ms, a ceiling of ~10 calls/second
pub const DEFAULT_MIN_ELAPSED_MS: i64 = 100;

/// Throttling state: the start timestamp of the most recent gated call.
///
/// Mutated only by [`RateLimitedExecutor::run`], behind the executor's
/// mutex. The timestamp is taken *before* the work runs, so the floor is
/// measured between call starts, not completions.
struct ThrottleState {
    last_request_ms: i64,
}

/// Executes units of work no closer together than a configured floor.
///
/// The executor wraps a zero-argument unit of work (typically a remote API
/// call) and suspends the calling task until at least `min_elapsed_ms` has
/// passed since the previous call *started*. Timestamps are taken from an
/// injected [`Clock`] and waits go through an injected [`Sleeper`], so tests
/// can simulate elapsed time deterministically.
///
/// The wait decision and the timestamp update form one critical section:
/// two tasks sharing an executor can never both read a stale timestamp and
/// skip the wait. The work itself runs outside the lock.
///
/// A failing call still consumes its slot - the timestamp is updated before
/// the work is invoked, so rapid retries of a fast-failing call cannot
/// bypass the floor.
///
/// # Example
///
/// ```ignore
/// use core_throttle::RateLimitedExecutor;
///
/// let executor = RateLimitedExecutor::new(100)?;
/// let response = executor.run(|| async { client.execute(request).await }).await?;
/// ```
pub struct RateLimitedExecutor {
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn Sleeper>,
    min_elapsed_ms: i64,
    state: Mutex<ThrottleState>,
}

impl RateLimitedExecutor {
    /// Create an executor over the system clock and tokio sleep.
    ///
    /// # Errors
    ///
    /// Returns [`ThrottleError::NegativeInterval`] if `min_elapsed_ms` is
    /// negative. The value is never clamped.
    pub fn new(min_elapsed_ms: i64) -> Result<Self> {
        Self::with_parts(min_elapsed_ms, Arc::new(SystemClock), Arc::new(TokioSleeper))
    }

    /// Create an executor with an injected clock and sleeper.
    ///
    /// # Arguments
    ///
    /// * `min_elapsed_ms` - floor between the start of one call and the next
    /// * `clock` - time source
    /// * `sleeper` - suspension primitive
    pub fn with_parts(
        min_elapsed_ms: i64,
        clock: Arc<dyn Clock>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self> {
        if min_elapsed_ms < 0 {
            return Err(ThrottleError::NegativeInterval(min_elapsed_ms));
        }

        // Seeded with construction time: a call issued within the floor of
        // construction waits out the remainder.
        let last_request_ms = clock.unix_timestamp_millis();

        Ok(Self {
            clock,
            sleeper,
            min_elapsed_ms,
            state: Mutex::new(ThrottleState { last_request_ms }),
        })
    }

    /// The configured floor in milliseconds
    pub fn min_elapsed_ms(&self) -> i64 {
        self.min_elapsed_ms
    }

    /// Run `work`, waiting first if the previous call started less than the
    /// floor ago.
    ///
    /// The outcome of `work` is returned verbatim - success and failure
    /// alike. No retry, no backoff, no queueing beyond the single in-flight
    /// call: throttling is observable only as added latency.
    pub async fn run<F, Fut, T>(&self, work: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        {
            let mut state = self.state.lock().await;

            let elapsed = self.clock.unix_timestamp_millis() - state.last_request_ms;
            if elapsed < self.min_elapsed_ms {
                let wait = Duration::from_millis((self.min_elapsed_ms - elapsed) as u64);
                debug!(wait_ms = wait.as_millis() as u64, "Throttling next call");
                self.sleeper.sleep(wait).await;
            }

            // Slot consumed at call start, even if the work fails.
            state.last_request_ms = self.clock.unix_timestamp_millis();
        }

        work().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex as StdMutex;

    /// Clock over an atomic millisecond counter, advanced by hand
    struct FakeClock {
        now_ms: AtomicI64,
    }

    impl FakeClock {
        fn new(start_ms: i64) -> Arc<Self> {
            Arc::new(Self {
                now_ms: AtomicI64::new(start_ms),
            })
        }

        fn advance(&self, ms: i64) {
            self.now_ms.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.timestamp_millis_opt(self.now_ms.load(Ordering::SeqCst))
                .unwrap()
        }
    }

    /// Sleeper that advances the fake clock instead of waiting, recording
    /// every requested duration
    struct FakeSleeper {
        clock: Arc<FakeClock>,
        slept: StdMutex<Vec<u64>>,
    }

    impl FakeSleeper {
        fn new(clock: Arc<FakeClock>) -> Arc<Self> {
            Arc::new(Self {
                clock,
                slept: StdMutex::new(Vec::new()),
            })
        }

        fn slept_ms(&self) -> Vec<u64> {
            self.slept.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for FakeSleeper {
        async fn sleep(&self, duration: Duration) {
            let ms = duration.as_millis() as u64;
            self.clock.advance(ms as i64);
            self.slept.lock().unwrap().push(ms);
        }
    }

    fn executor_with_floor(
        floor_ms: i64,
        start_ms: i64,
    ) -> (RateLimitedExecutor, Arc<FakeClock>, Arc<FakeSleeper>) {
        let clock = FakeClock::new(start_ms);
        let sleeper = FakeSleeper::new(Arc::clone(&clock));
        let executor = RateLimitedExecutor::with_parts(
            floor_ms,
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::clone(&sleeper) as Arc<dyn Sleeper>,
        )
        .unwrap();
        (executor, clock, sleeper)
    }

    #[tokio::test]
    async fn test_negative_floor_rejected() {
        let result = RateLimitedExecutor::new(-1);
        assert!(matches!(result, Err(ThrottleError::NegativeInterval(-1))));
    }

    #[tokio::test]
    async fn test_fast_work_waits_remainder_of_floor() {
        let (executor, clock, sleeper) = executor_with_floor(100, 0);
        // Move well past the floor so call A starts clean at t=1000.
        clock.advance(1000);

        let c = Arc::clone(&clock);
        executor.run(move || async move { c.advance(5) }).await;
        assert!(sleeper.slept_ms().is_empty());

        // Call B is issued 5ms after A started; it must wait the remaining
        // 95ms, so its work starts at t=1100.
        let c = Arc::clone(&clock);
        let started_at = executor
            .run(move || async move { c.now_ms.load(Ordering::SeqCst) })
            .await;

        assert_eq!(sleeper.slept_ms(), vec![95]);
        assert_eq!(started_at, 1100);
    }

    #[tokio::test]
    async fn test_slow_work_banks_no_idle_time() {
        let (executor, clock, sleeper) = executor_with_floor(100, 0);
        clock.advance(1000);

        // Call A takes 150ms; B is issued immediately after A returns.
        let c = Arc::clone(&clock);
        executor.run(move || async move { c.advance(150) }).await;

        let c = Arc::clone(&clock);
        let started_at = executor
            .run(move || async move { c.now_ms.load(Ordering::SeqCst) })
            .await;

        // Elapsed since A's start already exceeds the floor: no added wait.
        assert!(sleeper.slept_ms().is_empty());
        assert_eq!(started_at, 1150);
    }

    #[tokio::test]
    async fn test_elapsed_equal_to_floor_not_throttled() {
        let (executor, clock, sleeper) = executor_with_floor(100, 0);
        clock.advance(1000);

        executor.run(|| async {}).await;
        clock.advance(100);
        executor.run(|| async {}).await;

        assert!(sleeper.slept_ms().is_empty());
    }

    #[tokio::test]
    async fn test_failing_work_consumes_slot() {
        let (executor, clock, sleeper) = executor_with_floor(100, 0);
        clock.advance(1000);

        let c = Arc::clone(&clock);
        let outcome: std::result::Result<(), &str> = executor
            .run(move || async move {
                c.advance(5);
                Err("remote call failed")
            })
            .await;
        assert_eq!(outcome, Err("remote call failed"));

        // The failed call still counts against the budget: the next call
        // waits the full remainder from the failed call's start.
        executor.run(|| async {}).await;
        assert_eq!(sleeper.slept_ms(), vec![95]);
    }

    #[tokio::test]
    async fn test_first_call_within_floor_waits_remainder() {
        // The timestamp is seeded at construction, so a call issued
        // immediately waits out the whole floor.
        let (executor, _clock, sleeper) = executor_with_floor(100, 0);

        executor.run(|| async {}).await;

        assert_eq!(sleeper.slept_ms(), vec![100]);
    }

    #[tokio::test]
    async fn test_zero_floor_never_waits() {
        let (executor, _clock, sleeper) = executor_with_floor(0, 0);

        for _ in 0..5 {
            executor.run(|| async {}).await;
        }

        assert!(sleeper.slept_ms().is_empty());
    }

    #[tokio::test]
    async fn test_sequence_spacing_is_at_least_floor() {
        let (executor, clock, sleeper) = executor_with_floor(100, 0);
        clock.advance(1000);

        let mut starts = Vec::new();
        for _ in 0..4 {
            let c = Arc::clone(&clock);
            let started_at = executor
                .run(move || async move {
                    // Each call does 5ms of work.
                    let at = c.now_ms.load(Ordering::SeqCst);
                    c.advance(5);
                    at
                })
                .await;
            starts.push(started_at);
        }

        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= 100, "starts too close: {:?}", starts);
        }
        assert_eq!(sleeper.slept_ms(), vec![95, 95, 95]);
    }

    #[tokio::test]
    async fn test_result_passes_through_unmodified() {
        let (executor, clock, _sleeper) = executor_with_floor(100, 0);
        clock.advance(1000);

        let value = executor.run(|| async { 42u32 }).await;
        assert_eq!(value, 42);
    }
}
