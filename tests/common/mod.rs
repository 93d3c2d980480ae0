pub mod builders;

pub use builders::PlayerBuilder;

use std::time::Duration;

/// Lets the paused test clock run forward, firing any timers due meanwhile.
pub async fn elapse(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Yields until `condition` holds, giving spawned tasks a chance to run.
pub async fn settle<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached after 100 yields");
}
