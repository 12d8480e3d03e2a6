use std::future::Future;
use std::time::Duration;

use dash_logging::{dash_debug, dash_warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ClientError;

/// Latest value published by a polling loop.
///
/// Only the very first fetch may surface a failure; once a value has been
/// seen, later transient failures keep the prior value on display.
#[derive(Debug, Clone, PartialEq)]
pub enum PollValue<T> {
    /// No response handled yet.
    Pending,
    /// The first fetch failed; shown in place of data.
    Unavailable(String),
    /// Most recent successfully fetched value.
    Ready(T),
}

impl<T> PollValue<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            PollValue::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Handle to one subsystem's polling loop.
///
/// Dropping the handle does not stop the loop; call [`PollHandle::cancel`]
/// when the owning view is torn down. A tick that fires after cancellation
/// is a no-op.
pub struct PollHandle<T> {
    latest: watch::Receiver<PollValue<T>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl<T> PollHandle<T> {
    /// Receiver for the latest published value.
    pub fn subscribe(&self) -> watch::Receiver<PollValue<T>> {
        self.latest.clone()
    }

    /// Stops the loop; no further requests are issued.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the loop task to finish after cancellation.
    pub async fn join(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

/// Spawns a sequential polling loop: fetch, publish, sleep, repeat.
///
/// A new poll is never issued before the previous response is handled, so a
/// slow endpoint sees at most one in-flight request from this subsystem.
pub fn spawn_poller<T, F, Fut>(
    name: &'static str,
    interval: Duration,
    cancel: CancellationToken,
    fetch: F,
) -> PollHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, ClientError>> + Send,
{
    let (tx, rx) = watch::channel(PollValue::Pending);
    let loop_cancel = cancel.clone();

    let task = tokio::spawn(async move {
        let mut cycle: u64 = 0;
        loop {
            tokio::select! {
                _ = loop_cancel.cancelled() => break,
                result = fetch() => {
                    cycle += 1;
                    dash_logging::set_poll_cycle(cycle);
                    match result {
                        Ok(value) => {
                            dash_debug!("{name}: poll {cycle} ok");
                            let _ = tx.send(PollValue::Ready(value));
                        }
                        Err(err) => {
                            let first_failure =
                                matches!(*tx.borrow(), PollValue::Pending);
                            if first_failure {
                                dash_warn!("{name}: first fetch failed: {err}");
                                let _ = tx.send(PollValue::Unavailable(err.to_string()));
                            } else {
                                // Keep whatever is on display; retry next tick.
                                dash_warn!("{name}: poll {cycle} failed: {err}");
                            }
                        }
                    }
                }
            }

            tokio::select! {
                _ = loop_cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }
        dash_debug!("{name}: poller stopped");
    });

    PollHandle {
        latest: rx,
        cancel,
        task,
    }
}
