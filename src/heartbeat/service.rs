use crate::utils::task_tracker::TaskTracker;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

pub const KEEPALIVE_MESSAGE: &str = "I am alive. Resonance is unbroken.";

const TASK_NAME: &str = "keepalive";

/// Periodic liveness log line, independent of the dispatcher and its counter.
pub struct KeepAliveService {
    interval: Duration,
    enabled: bool,
    ticks: Arc<AtomicU64>,
    task_tracker: Arc<TaskTracker>,
}

impl KeepAliveService {
    pub fn new(interval_s: u64, enabled: bool) -> Self {
        Self {
            interval: Duration::from_secs(interval_s.max(1)),
            enabled,
            ticks: Arc::new(AtomicU64::new(0)),
            task_tracker: Arc::new(TaskTracker::new()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of pings emitted so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub async fn is_running(&self) -> bool {
        self.task_tracker.is_running(TASK_NAME).await
    }

    /// Spawn the ping loop. The first ping is logged immediately.
    pub async fn start(&self) {
        if !self.enabled {
            info!("Keep-alive pinger disabled");
            return;
        }

        let interval = self.interval;
        let ticks = self.ticks.clone();

        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            loop {
                timer.tick().await;
                ticks.fetch_add(1, Ordering::Relaxed);
                info!("{}", KEEPALIVE_MESSAGE);
            }
        });

        self.task_tracker.spawn(TASK_NAME.to_string(), handle).await;

        info!("Keep-alive pinger started (every {}s)", interval.as_secs());
    }

    pub async fn stop(&self) {
        self.task_tracker.cancel_all().await;
    }
}

#[cfg(test)]
mod tests;
