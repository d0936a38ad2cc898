//! Gateway stop signal.
//!
//! One trigger, many listeners: the serve loop waits on a receiver for its
//! graceful drain, and signal handling or test harnesses hold the trigger.

use tokio::sync::broadcast;

#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A receiver that resolves once [`Shutdown::trigger`] fires.
    ///
    /// Subscribe before triggering; a late receiver misses the signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. Triggering with nobody listening is a no-op.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_reaches_every_clone() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let mut signals = shutdown.clone().subscribe();

        shutdown.clone().trigger();
        assert!(server.recv().await.is_ok());
        assert!(signals.recv().await.is_ok());
    }

    #[test]
    fn trigger_without_listeners_is_harmless() {
        Shutdown::default().trigger();
    }
}
