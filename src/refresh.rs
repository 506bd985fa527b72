//! Cancellable periodic refresh timer.
//!
//! The schedule is an owned handle: dropping or cancelling it stops
//! the task, and a manual refresh restarts the period by replacing the
//! handle. Whether a due refresh actually fetches is the app's call
//! (it skips while a fetch is in flight).

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// Handle to a spawned timer task that sends `msg` every `period`.
///
/// The task ends when the handle is cancelled or dropped, or when the
/// receiving side goes away.
pub struct RefreshTimer {
    cancel: CancellationToken,
}

impl RefreshTimer {
    pub fn start<M: Clone + Send + 'static>(
        period: Duration,
        tx: UnboundedSender<M>,
        msg: M,
    ) -> Self {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            let mut ticker = interval(period);
            // interval fires immediately; the first period starts now.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if tx.send(msg.clone()).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        Self { cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[tokio::test]
    async fn fires_periodically() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _timer = RefreshTimer::start(Duration::from_millis(10), tx, ());
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timer never fired")
            .expect("channel closed");
    }

    #[tokio::test]
    async fn cancel_stops_the_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = RefreshTimer::start(Duration::from_millis(10), tx, ());
        timer.cancel();
        // Drain whatever was in flight, then the channel must close.
        let closed = timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok(), "sender kept the channel open after cancel");
    }

    #[tokio::test]
    async fn drop_stops_the_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(RefreshTimer::start(Duration::from_millis(10), tx, ()));
        let closed = timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
