//! Trailing-edge debouncing for search input.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Clones share one ticket counter, so a call on any clone supersedes
/// pending calls on the others
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay. Returns true only if no later `settle` or
    /// `cancel` happened in the meantime.
    pub async fn settle(&self) -> bool {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Supersede every pending `settle`
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_settles() {
        let debouncer = Debouncer::default();
        let started = Instant::now();

        let (first, second, third) = tokio::join!(
            debouncer.settle(),
            debouncer.settle(),
            debouncer.settle()
        );

        assert_eq!((first, second, third), (false, false, true));
        assert!(started.elapsed() >= DEFAULT_DEBOUNCE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_all_settle() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        assert!(debouncer.settle().await);
        assert!(debouncer.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_supersedes_pending_call() {
        let debouncer = Debouncer::default();
        let cancel_later = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            debouncer.cancel();
        };
        let (settled, ()) = tokio::join!(debouncer.settle(), cancel_later);
        assert!(!settled);
    }
}
