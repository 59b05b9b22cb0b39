use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

/// Fans a single shutdown decision out to every interested task.
///
/// One side waits for SIGTERM/SIGINT, the other sides subscribe; when the
/// signal lands, all subscribers wake at once and `is_shutting_down`
/// flips permanently.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    /// Wakes subscribers when shutdown begins
    tx: broadcast::Sender<()>,
    /// Latches once shutdown has been requested
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Returns the coordinator plus a first subscriber.
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (tx, rx) = broadcast::channel(1);
        let coordinator = Self {
            tx,
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, rx)
    }

    /// Another receiver that wakes when shutdown begins.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Whether shutdown has already been requested.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Relaxed)
    }

    /// Requests shutdown. Only the first call notifies subscribers.
    pub fn shutdown(&self) {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
        }
    }

    /// Blocks until SIGTERM or Ctrl+C, then requests shutdown.
    pub async fn wait_for_signal(&self) {
        let signal_name = sigterm_or_ctrl_c().await;
        info!("Received {}, initiating graceful shutdown", signal_name);
        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new().0
    }
}

/// Resolves when SIGTERM or Ctrl+C arrives, naming which one fired.
///
/// On non-unix targets only Ctrl+C exists; the SIGTERM branch never fires.
async fn sigterm_or_ctrl_c() -> &'static str {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT (Ctrl+C)",
        _ = terminate => "SIGTERM",
    }
}

/// Bare signal future for `axum::serve().with_graceful_shutdown()`.
///
/// Stops accepting connections but runs no resource cleanup. Apps holding
/// database clients should go through `create_production_app`, which pairs
/// the signal with a cleanup future.
pub async fn shutdown_signal() {
    let signal_name = sigterm_or_ctrl_c().await;
    info!("Received {}, shutting down gracefully", signal_name);
}

/// Signal future wired to a coordinator, for `create_production_app`.
pub(crate) async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    coordinator.wait_for_signal().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_notifies_subscribers() {
        let (coordinator, mut rx) = ShutdownCoordinator::new();
        assert!(!coordinator.is_shutting_down());

        coordinator.shutdown();

        assert!(coordinator.is_shutting_down());
        rx.recv().await.expect("subscriber should be notified");
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let (coordinator, mut rx) = ShutdownCoordinator::new();

        coordinator.shutdown();
        coordinator.shutdown();

        rx.recv().await.expect("first signal should arrive");
        // The second call must not queue another notification
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_shutdown_flag() {
        let (coordinator, _rx) = ShutdownCoordinator::new();
        let clone = coordinator.clone();

        coordinator.shutdown();

        assert!(clone.is_shutting_down());
    }
}
