use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tracing::{error, info};

/// Shutdown coordinator that manages graceful application shutdown.
///
/// A signal and a server error can both end serving; clones share one flag so
/// shutdown is initiated exactly once.
#[derive(Clone, Default)]
pub struct ShutdownCoordinator {
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initiate shutdown. Returns `false` if it was already initiated.
    pub fn shutdown(&self) -> bool {
        let first = self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if first {
            info!("Initiating graceful shutdown");
        }
        first
    }

    /// Wait for SIGTERM or SIGINT, then initiate shutdown.
    pub async fn wait_for_signal(&self) {
        shutdown_signal().await;
        self.shutdown();
    }
}

/// Completes on Ctrl+C or SIGTERM.
///
/// Usable directly with `axum::serve().with_graceful_shutdown()`. If a handler
/// cannot be installed the failure is logged and that signal is ignored.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_is_initiated_once() {
        let coordinator = ShutdownCoordinator::new();
        assert!(coordinator.shutdown());
        assert!(!coordinator.shutdown());
    }

    #[test]
    fn test_clones_share_state() {
        let coordinator = ShutdownCoordinator::default();
        let clone = coordinator.clone();
        assert!(clone.shutdown());
        assert!(!coordinator.shutdown());
    }
}
