//! Polling helpers for asserting on background tasks.

use std::time::Duration;

/// Wait until `condition` holds, checking every few milliseconds.
///
/// # Panics
///
/// Panics if the condition is still false after five seconds.
pub async fn until<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 5s"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
