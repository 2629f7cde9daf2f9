//! Wall-clock tests for the rate-limited executor.
//!
//! These run against the real system clock and tokio sleep; assertions use
//! a tolerance for timer granularity. The deterministic coverage lives in
//! the executor's unit tests with a fake clock.

use core_throttle::RateLimitedExecutor;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_back_to_back_calls_are_spaced() {
    let executor = RateLimitedExecutor::new(50).unwrap();

    // Let the construction-seeded slot expire first.
    tokio::time::sleep(Duration::from_millis(60)).await;

    let mut starts = Vec::new();
    for _ in 0..3 {
        let started = executor.run(|| async { Instant::now() }).await;
        starts.push(started);
    }

    for pair in starts.windows(2) {
        let gap = pair[1].duration_since(pair[0]);
        assert!(gap >= Duration::from_millis(45), "gap too small: {:?}", gap);
    }
}

#[tokio::test]
async fn test_error_propagates_through_gate() {
    let executor = RateLimitedExecutor::new(0).unwrap();

    let outcome: Result<(), String> = executor
        .run(|| async { Err("boom".to_string()) })
        .await;

    assert_eq!(outcome, Err("boom".to_string()));
}

#[tokio::test]
async fn test_already_elapsed_adds_no_latency() {
    let executor = RateLimitedExecutor::new(30).unwrap();
    tokio::time::sleep(Duration::from_millis(40)).await;

    let issued = Instant::now();
    executor.run(|| async {}).await;

    assert!(issued.elapsed() < Duration::from_millis(20));
}
