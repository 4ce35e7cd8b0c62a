//! Deferred completion signal for forced log uploads
//!
//! A writer answers [`LogWriter::force_upload`](crate::core::LogWriter::force_upload)
//! with an [`UploadCompletion`]. It resolves exactly once, to success or to a
//! [`LoggerError`]. Callers may `.await` it, block on it, or drop it.
//!
//! ```
//! use context_logger::core::upload_channel;
//!
//! let (notifier, completion) = upload_channel();
//! std::thread::spawn(move || notifier.complete(Ok(())));
//! assert!(completion.wait().is_ok());
//! ```

use super::error::{LoggerError, Result};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Upper bound between two checks in [`UploadCompletion::wait_timeout`]
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Create a linked notifier/completion pair
pub fn upload_channel() -> (UploadNotifier, UploadCompletion) {
    let (sender, receiver) = oneshot::channel();
    (
        UploadNotifier { sender },
        UploadCompletion {
            receiver: Some(receiver),
        },
    )
}

/// Writer side of an upload request
///
/// Dropping it without calling [`complete`](Self::complete) resolves the
/// paired completion to [`LoggerError::UploadAbandoned`].
pub struct UploadNotifier {
    sender: oneshot::Sender<Result<()>>,
}

impl UploadNotifier {
    pub fn complete(self, outcome: Result<()>) {
        // The caller may have dropped its completion
        let _ = self.sender.send(outcome);
    }

    pub fn succeed(self) {
        self.complete(Ok(()));
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.complete(Err(LoggerError::upload_failed(reason)));
    }

    /// Whether the caller stopped listening for the outcome
    pub fn is_abandoned(&self) -> bool {
        self.sender.is_closed()
    }
}

impl fmt::Debug for UploadNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadNotifier")
            .field("abandoned", &self.is_abandoned())
            .finish()
    }
}

/// Caller side of an upload request
#[must_use = "an upload completion does nothing unless awaited, waited on, or dropped deliberately"]
pub struct UploadCompletion {
    /// `None` once the outcome has been taken
    receiver: Option<oneshot::Receiver<Result<()>>>,
}

fn received(outcome: std::result::Result<Result<()>, oneshot::error::RecvError>) -> Result<()> {
    outcome.unwrap_or(Err(LoggerError::UploadAbandoned))
}

impl UploadCompletion {
    /// An already resolved completion
    pub fn completed(outcome: Result<()>) -> Self {
        let (notifier, completion) = upload_channel();
        notifier.complete(outcome);
        completion
    }

    pub fn succeeded() -> Self {
        Self::completed(Ok(()))
    }

    pub fn failed(error: LoggerError) -> Self {
        Self::completed(Err(error))
    }

    /// Take the outcome if it is already available, without blocking
    pub fn try_wait(&mut self) -> Option<Result<()>> {
        let Some(receiver) = self.receiver.as_mut() else {
            return Some(Err(LoggerError::CompletionConsumed));
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(LoggerError::UploadAbandoned),
        };
        self.receiver = None;
        Some(outcome)
    }

    /// Block the current thread until the upload resolves
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context;
    /// `.await` the completion there instead.
    pub fn wait(mut self) -> Result<()> {
        match self.receiver.take() {
            Some(receiver) => received(receiver.blocking_recv()),
            None => Err(LoggerError::CompletionConsumed),
        }
    }

    /// Block for at most `timeout`
    ///
    /// A timeout too large to represent as a deadline waits without one.
    pub fn wait_timeout(mut self, timeout: Duration) -> Result<()> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.wait();
        };

        let mut interval = Duration::from_micros(50);
        loop {
            if let Some(outcome) = self.try_wait() {
                return outcome;
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(LoggerError::upload_timeout(timeout));
            }
            thread::sleep(interval.min(deadline - now));
            interval = (interval * 2).min(MAX_POLL_INTERVAL);
        }
    }
}

impl Future for UploadCompletion {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(receiver) = self.receiver.as_mut() else {
            return Poll::Ready(Err(LoggerError::CompletionConsumed));
        };

        let outcome = ready!(Pin::new(receiver).poll(cx));
        self.receiver = None;
        Poll::Ready(received(outcome))
    }
}

impl fmt::Debug for UploadCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCompletion")
            .field("consumed", &self.receiver.is_none())
            .finish()
    }
}
