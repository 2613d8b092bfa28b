//! Shutdown coordination.
//!
//! A [`Shutdown`] fans one stop request out to every subscriber. In
//! production the stop request comes from an OS signal; tests trigger it
//! directly.

use tokio::sync::broadcast;

use crate::lifecycle::signals;

#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Coordinator that only fires on [`Shutdown::trigger`].
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Coordinator that also fires on SIGINT or SIGTERM.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_signal() -> Self {
        let shutdown = Self::new();
        tokio::spawn(signals::wait_for_signal(shutdown.clone()));
        shutdown
    }

    /// Receiver that resolves once shutdown is triggered. Only triggers
    /// after this call are observed.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
