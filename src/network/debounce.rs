use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

/// Holds work back until its trigger has been quiet for a fixed window.
///
/// Each `call` aborts the previously scheduled task, so of any burst of
/// triggers only the last one runs.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `work` to run after the quiet window, replacing whatever an
    /// earlier call scheduled.
    pub fn call<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            work.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
