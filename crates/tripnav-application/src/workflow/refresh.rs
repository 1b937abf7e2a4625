use std::sync::Arc;
use tokio::sync::watch;

/// Level-triggered "needs refresh" flag shared between producers and list
/// workflows.
///
/// Raising is idempotent. The flag stays raised until the consumer calls
/// [`acknowledge`](Self::acknowledge) after it has re-fetched; producers
/// never clear it.
#[derive(Debug, Clone)]
pub struct RefreshSignal {
    state: Arc<watch::Sender<bool>>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn raise(&self) {
        self.state.send_if_modified(|raised| !std::mem::replace(raised, true));
    }

    pub fn is_raised(&self) -> bool {
        *self.state.borrow()
    }

    /// Clears the flag. Returns whether it was raised.
    pub fn acknowledge(&self) -> bool {
        let mut was_raised = false;
        self.state.send_if_modified(|raised| {
            was_raised = std::mem::replace(raised, false);
            was_raised
        });
        was_raised
    }

    /// Receiver that is notified whenever the flag changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_is_level_triggered() {
        let signal = RefreshSignal::new();
        assert!(!signal.is_raised());

        signal.raise();
        signal.raise();
        assert!(signal.is_raised());
        assert!(signal.clone().is_raised());

        assert!(signal.acknowledge());
        assert!(!signal.is_raised());
        assert!(!signal.acknowledge());
    }

    #[tokio::test]
    async fn test_subscribers_observe_raise() {
        let signal = RefreshSignal::new();
        let mut rx = signal.subscribe();

        let producer = signal.clone();
        tokio::spawn(async move { producer.raise() });

        rx.wait_for(|raised| *raised).await.unwrap();
        assert!(signal.is_raised());
    }
}
