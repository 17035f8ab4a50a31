// SPDX-License-Identifier: Apache-2.0
//! Delivery gate: pause/resume for command delivery across all connections.

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable gate that connection tasks consult before delivering each
/// decoded line.
///
/// Pausing never drops input: a task that already read a line parks on
/// [`DeliveryGate::wait_open`] while later bytes accumulate in its socket
/// buffers, so resuming replays every connection's backlog in arrival order.
#[derive(Clone, Debug)]
pub struct DeliveryGate {
    open: Arc<watch::Sender<bool>>,
}

impl Default for DeliveryGate {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryGate {
    /// Create an open gate.
    pub fn new() -> Self {
        let (open, _) = watch::channel(true);
        Self { open: Arc::new(open) }
    }

    /// Stop delivery for all connections.
    pub fn pause(&self) {
        self.open.send_replace(false);
    }

    /// Re-enable delivery; parked tasks wake and flush their backlog.
    pub fn resume(&self) {
        self.open.send_replace(true);
    }

    /// Whether delivery is currently enabled.
    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    /// Wait until delivery is enabled. Returns immediately when open.
    pub async fn wait_open(&self) {
        let mut rx = self.open.subscribe();
        // The sender lives inside self, so wait_for cannot fail.
        let _ = rx.wait_for(|open| *open).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn open_gate_passes_immediately() {
        let gate = DeliveryGate::new();
        assert!(gate.is_open());
        timeout(Duration::from_millis(100), gate.wait_open())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn paused_gate_parks_until_resume() {
        let gate = DeliveryGate::new();
        gate.pause();
        assert!(!gate.is_open());

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move {
                gate.wait_open().await;
            })
        };
        // Give the waiter a chance to park; it must not complete.
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        gate.resume();
        timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
