//! Polling helper for asserting on detached work.

use std::time::Duration;

/// Polls `condition` every 10ms until it holds or `within` elapses.
/// Returns whether the condition was observed to hold.
pub async fn eventually(within: Duration, mut condition: impl FnMut() -> bool) -> bool {
    tokio::time::timeout(within, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .is_ok()
}
