//! External cancellation of running games.

use std::sync::Arc;

use tokio::sync::watch;

/// Requests that games stop. Cloning shares the same flag, and every
/// [`AbortSignal`] taken from it observes the request.
#[derive(Debug, Clone)]
pub struct AbortHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl AbortHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Abort every game holding a signal from this handle. In-flight bot
    /// processes are killed.
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_aborted(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for AbortHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of an [`AbortHandle`].
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        AbortHandle::new().signal()
    }

    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once an abort is requested. Pends forever if every handle
    /// is dropped without aborting.
    pub async fn aborted(&mut self) {
        let fired = self.rx.wait_for(|&aborted| aborted).await.is_ok();
        if !fired {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn signal_fires_after_abort() {
        let handle = AbortHandle::new();
        let mut signal = handle.signal();
        assert!(!signal.is_aborted());
        let trigger = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.abort();
        });
        tokio::time::timeout(Duration::from_secs(5), signal.aborted())
            .await
            .expect("signal should fire");
        assert!(handle.is_aborted());
    }

    #[tokio::test]
    async fn never_signal_stays_pending() {
        let mut signal = AbortSignal::never();
        let waited = tokio::time::timeout(Duration::from_millis(20), signal.aborted()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn late_subscriber_sees_earlier_abort() {
        let handle = AbortHandle::new();
        handle.abort();
        let mut signal = handle.signal();
        drop(handle);
        tokio::time::timeout(Duration::from_secs(1), signal.aborted())
            .await
            .expect("abort requested before subscribing");
    }
}
