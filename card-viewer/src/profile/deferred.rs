// Cancellable delayed task
//
// Runs `work` after `delay` unless the `DeferredTask` handle is dropped first. The handle keeps a
// key so callers can tell whether the pending work is already scheduled for the same identity.

use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::{CancellationToken, DropGuard};

#[derive(Debug)]
pub struct DeferredTask {
    key: String,
    _cancel_on_drop: DropGuard,
}

impl DeferredTask {
    pub fn schedule<F, Fut>(runtime: &Handle, key: impl Into<String>, delay: Duration, work: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => work().await,
            }
        });

        Self {
            key: key.into(),
            _cancel_on_drop: token.drop_guard(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn counting_task(delay_ms: u64, counter: &Arc<AtomicUsize>) -> DeferredTask {
        let counter = Arc::clone(counter);
        DeferredTask::schedule(&Handle::current(), "k", Duration::from_millis(delay_ms), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = counting_task(100, &counter);
        assert_eq!(task.key(), "k");

        tokio::time::sleep(Duration::from_millis(99)).await;
        settle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_before_delay_cancels() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = counting_task(100, &counter);

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(task);

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
