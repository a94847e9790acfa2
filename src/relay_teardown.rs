use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

pub struct RelayTeardown {
    stopped: AtomicBool,
    notify: Notify,
}

impl RelayTeardown {
    pub fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Returns true only for the caller which actually initiated the teardown.
    pub fn stop(&self) -> bool {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return false;
        }

        self.notify.notify_waiters();
        true
    }

    pub async fn wait_stopped(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_stopped() {
                return;
            }

            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::RelayTeardown;

    #[test]
    fn test_stop_is_idempotent() {
        let teardown = RelayTeardown::new();
        assert!(!teardown.is_stopped());

        assert!(teardown.stop());
        assert!(!teardown.stop());
        assert!(teardown.is_stopped());
    }

    #[tokio::test]
    async fn test_waiter_is_released_by_stop() {
        let teardown = Arc::new(RelayTeardown::new());

        let waiter = {
            let teardown = teardown.clone();
            tokio::spawn(async move { teardown.wait_stopped().await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        teardown.stop();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_after_stop_returns_immediately() {
        let teardown = RelayTeardown::new();
        teardown.stop();

        tokio::time::timeout(Duration::from_millis(100), teardown.wait_stopped())
            .await
            .unwrap();
    }
}
