use std::time::Duration;
use tokio::sync::watch;

/// Owner side of the single cooperative cancellation signal.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    pub fn trigger(&self) {
        if !*self.tx.borrow() {
            self.tx.send_replace(true);
            tracing::info!("shutdown signaled");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Route Ctrl-C into the shutdown signal. May only be installed once per process.
    pub fn install_ctrlc_handler(&self) -> anyhow::Result<()> {
        let handle = self.clone();
        ctrlc::set_handler(move || {
            tracing::info!("interrupt received");
            handle.trigger();
        })?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been triggered. If every handle is dropped
    /// without triggering, this never resolves.
    pub async fn triggered(&mut self) {
        if self.rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Sleep for `duration` unless shutdown arrives first. Returns `true` on shutdown.
pub async fn sleep_or_shutdown(duration: Duration, signal: &mut ShutdownSignal) -> bool {
    if signal.is_triggered() {
        return true;
    }

    tokio::select! {
        _ = tokio::time::sleep(duration) => signal.is_triggered(),
        _ = signal.triggered() => true,
    }
}
