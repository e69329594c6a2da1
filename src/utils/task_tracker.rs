//! Named registry of background tasks spawned with `tokio::spawn`,
//! so long-running loops (the keep-alive pinger) can be cancelled at shutdown.
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct TaskTracker {
    tasks: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl TaskTracker {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Track a spawned task under `name`. A live task with the same name is aborted.
    pub async fn spawn(&self, name: String, handle: JoinHandle<()>) {
        let mut tasks = self.tasks.lock().await;
        if let Some(old_handle) = tasks.remove(&name) {
            warn!("Aborting existing task '{}' before tracking new one", name);
            old_handle.abort();
        }
        tasks.insert(name, handle);
    }

    /// Whether a task is tracked under `name` and has not finished.
    pub async fn is_running(&self, name: &str) -> bool {
        self.tasks
            .lock()
            .await
            .get(name)
            .is_some_and(|h| !h.is_finished())
    }

    /// Cancel all tracked tasks
    pub async fn cancel_all(&self) {
        let tasks: HashMap<String, JoinHandle<()>> = {
            let mut guard = self.tasks.lock().await;
            guard.drain().collect()
        };
        let count = tasks.len();
        for (name, handle) in tasks {
            handle.abort();
            debug!("Cancelled task '{}'", name);
        }
        if count > 0 {
            info!("Cancelled {} tracked tasks", count);
        }
    }
}

impl Default for TaskTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sleeper() -> JoinHandle<()> {
        tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        })
    }

    #[tokio::test]
    async fn test_spawn_and_cancel_all() {
        let tracker = TaskTracker::new();
        tracker.spawn("keepalive".to_string(), sleeper()).await;
        assert!(tracker.is_running("keepalive").await);

        tracker.cancel_all().await;
        assert!(tracker.tasks.lock().await.is_empty());
        assert!(!tracker.is_running("keepalive").await);
    }

    #[tokio::test]
    async fn test_spawn_replaces_existing() {
        let tracker = TaskTracker::new();
        tracker.spawn("keepalive".to_string(), sleeper()).await;
        tracker.spawn("keepalive".to_string(), sleeper()).await;

        assert_eq!(tracker.tasks.lock().await.len(), 1);
        tracker.cancel_all().await;
    }

    #[tokio::test]
    async fn test_finished_task_is_not_running() {
        let tracker = TaskTracker::new();
        let handle = tokio::spawn(async {});
        tracker.spawn("done".to_string(), handle).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!tracker.is_running("done").await);
    }
}
