//! Simulated progress for long-running generations.
//!
//! Progress values carry no meaning beyond "still working". The ticker is
//! owned by a single generation and is aborted when dropped.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Upper bound for progress values.
pub const MAX_PROGRESS: u8 = 100;

/// Periodic task that bumps a shared progress value by one per tick.
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Start ticking `progress` every `interval` until it reaches [`MAX_PROGRESS`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(progress: Arc<watch::Sender<u8>>, interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticks.tick().await;

            loop {
                ticks.tick().await;

                let mut capped = false;
                progress.send_modify(|value| {
                    *value = value.saturating_add(1).min(MAX_PROGRESS);
                    capped = *value >= MAX_PROGRESS;
                });

                if capped {
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Whether the ticker task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the ticker.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
