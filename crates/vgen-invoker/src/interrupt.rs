//! Deadline and cancellation racing for external calls.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

use crate::error::InvokeError;

/// Why an external call stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Timeout,
    Cancelled,
}

impl Interrupt {
    pub(crate) fn into_error(self, timeout: Option<Duration>) -> InvokeError {
        match self {
            Interrupt::Timeout => InvokeError::Timeout(timeout.map(whole_secs).unwrap_or(0)),
            Interrupt::Cancelled => InvokeError::Cancelled,
        }
    }
}

/// Seconds in `d`, rounded up so sub-second deadlines never report zero.
fn whole_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

/// Run `fut` until it completes, the deadline elapses, or the cancel flag
/// flips to `true`. A dropped cancel sender never cancels.
pub(crate) async fn race<F, T>(
    fut: F,
    timeout: Option<Duration>,
    cancel_rx: Option<watch::Receiver<bool>>,
) -> Result<T, Interrupt>
where
    F: Future<Output = T>,
{
    tokio::select! {
        output = fut => Ok(output),
        _ = deadline(timeout) => Err(Interrupt::Timeout),
        _ = cancelled(cancel_rx) => Err(Interrupt::Cancelled),
    }
}

async fn deadline(timeout: Option<Duration>) {
    match timeout {
        Some(timeout) => tokio::time::sleep(timeout).await,
        None => std::future::pending::<()>().await,
    }
}

async fn cancelled(cancel_rx: Option<watch::Receiver<bool>>) {
    if let Some(mut rx) = cancel_rx {
        let sender_dropped = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if !sender_dropped {
            return;
        }
    }
    std::future::pending::<()>().await
}
