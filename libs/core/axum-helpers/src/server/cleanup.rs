//! Closing database handles on the way out.

use tracing::{error, info};

/// Cleanup handler for MongoDB clients.
///
/// The driver cleans up its connection pools when the last `Client` clone is
/// dropped, but `shutdown()` waits for outstanding operations to finish and
/// lets us log the cleanup for observability.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::close_mongo;
///
/// close_mongo(mongo_client, "main").await;
/// ```
pub async fn close_mongo(client: mongodb::Client, name: &str) {
    client.shutdown().await;
    info!("MongoDB client '{}' closed successfully", name);
}

/// Collects named cleanup tasks and drains them at shutdown.
///
/// Tasks are spawned as they are added, so by the time [`run`] is awaited
/// they are already in flight. A panicking task is logged and the rest
/// still complete.
///
/// [`run`]: CleanupCoordinator::run
///
/// # Example
/// ```ignore
/// use axum_helpers::server::{CleanupCoordinator, close_mongo};
///
/// let mut cleanup = CleanupCoordinator::new();
/// cleanup.add_task("mongodb", async { close_mongo(client, "main").await });
/// cleanup.run().await;
/// ```
pub struct CleanupCoordinator {
    tasks: Vec<(&'static str, tokio::task::JoinHandle<()>)>,
}

impl CleanupCoordinator {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Spawns `task` now and tracks it under `name`.
    pub fn add_task<F>(&mut self, name: &'static str, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        self.tasks.push((name, handle));
    }

    /// Waits for every tracked task, logging each outcome.
    pub async fn run(self) {
        info!("Running {} cleanup tasks", self.tasks.len());

        for (name, handle) in self.tasks {
            match handle.await {
                Ok(_) => info!("Cleanup task '{}' completed", name),
                Err(e) => error!("Cleanup task '{}' failed: {}", name, e),
            }
        }

        info!("All cleanup tasks completed");
    }
}

impl Default for CleanupCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_cleanup_coordinator_runs_all_tasks() {
        let completed = Arc::new(AtomicUsize::new(0));
        let mut cleanup = CleanupCoordinator::new();

        for name in ["first", "second", "third"] {
            let completed = Arc::clone(&completed);
            cleanup.add_task(name, async move {
                completed.fetch_add(1, Ordering::SeqCst);
            });
        }

        cleanup.run().await;
        assert_eq!(completed.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cleanup_coordinator_survives_panicking_task() {
        let completed = Arc::new(AtomicUsize::new(0));
        let mut cleanup = CleanupCoordinator::new();

        cleanup.add_task("panicking", async {
            panic!("cleanup task failed");
        });
        let flag = Arc::clone(&completed);
        cleanup.add_task("healthy", async move {
            flag.fetch_add(1, Ordering::SeqCst);
        });

        // A panicking task is logged, not propagated
        cleanup.run().await;
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }
}
