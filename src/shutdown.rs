use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

const INTERRUPT_ACK: &[u8] = b"\nCaught SIGINT. Exiting gracefully...\n";

/// Cooperative cancellation shared by the session loop and its sleeps.
#[derive(Clone, Debug)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Shutdown { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Sleeps for `duration` unless cancelled first.
    ///
    /// Returns `false` when the sleep was cut short.
    pub async fn sleep(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return false;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.cancelled() => false,
        }
    }
}

/// Cancels `shutdown` on the first Ctrl+C.
///
/// The acknowledgment goes straight to the stdout handle, bypassing
/// formatted printing.
pub fn spawn_interrupt_listener(shutdown: Shutdown) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let mut out = std::io::stdout().lock();
                let _ = out.write_all(INTERRUPT_ACK);
                let _ = out.flush();
                shutdown.cancel();
            }
            Err(err) => tracing::error!(%err, "failed to listen for interrupt signal"),
        }
    })
}
