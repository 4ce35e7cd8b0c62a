//! Channel writer for handing records to a consumer thread
//!
//! The writer never blocks the logging thread. Persistence, batching and
//! transport belong to whoever drains the receiver; a forced upload arrives
//! there as [`WriterEvent::Flush`] carrying the notifier to answer.

use crate::core::{
    upload_channel, LogContext, LogLevel, LogRecord, LogWriter, LoggerError, UploadCompletion,
    UploadNotifier,
};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};

/// What the consumer receives
#[derive(Debug)]
pub enum WriterEvent {
    Record(LogRecord),
    /// Flush everything received so far, then complete the notifier
    Flush(UploadNotifier),
}

/// # Example
///
/// ```
/// use context_logger::prelude::*;
/// use context_logger::writers::{ChannelLogWriter, WriterEvent};
/// use std::sync::Arc;
///
/// let (writer, events) = ChannelLogWriter::unbounded();
/// let consumer = std::thread::spawn(move || {
///     let mut stored = Vec::new();
///     for event in events {
///         match event {
///             WriterEvent::Record(record) => stored.push(record),
///             WriterEvent::Flush(notifier) => notifier.succeed(),
///         }
///     }
///     stored.len()
/// });
///
/// let logger = ContextLogger::for_application("com.example.app", Arc::new(writer));
/// logger.info("queued");
/// logger.force_log_upload().wait().unwrap();
/// drop(logger);
///
/// assert_eq!(consumer.join().unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct ChannelLogWriter {
    sender: Sender<WriterEvent>,
    capacity: Option<usize>,
    dropped: AtomicU64,
}

impl ChannelLogWriter {
    /// Writer with a bounded queue; records beyond `capacity` are dropped
    pub fn bounded(capacity: usize) -> (Self, Receiver<WriterEvent>) {
        let (sender, receiver) = bounded(capacity);
        (Self::from_sender(sender, Some(capacity)), receiver)
    }

    pub fn unbounded() -> (Self, Receiver<WriterEvent>) {
        let (sender, receiver) = unbounded();
        (Self::from_sender(sender, None), receiver)
    }

    fn from_sender(sender: Sender<WriterEvent>, capacity: Option<usize>) -> Self {
        Self {
            sender,
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    /// Records dropped because the queue was full
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Events currently waiting for the consumer
    pub fn pending(&self) -> usize {
        self.sender.len()
    }

    fn alert_and_drop(&self) {
        let dropped_count = self.dropped.fetch_add(1, Ordering::Relaxed);

        // Alert on first drop and periodically thereafter
        if dropped_count == 0 || (dropped_count + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Writer queue full, {} records dropped. \
                 Consider a larger capacity or a faster consumer.",
                dropped_count + 1
            );
        }
    }
}

impl LogWriter for ChannelLogWriter {
    fn write(&self, level: LogLevel, context: LogContext) {
        match self.sender.try_send(WriterEvent::Record(LogRecord::new(level, context))) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => self.alert_and_drop(),
            Err(TrySendError::Disconnected(_)) => {
                // Consumer is gone, silently ignore
            }
        }
    }

    fn force_upload(&self) -> UploadCompletion {
        let (notifier, completion) = upload_channel();

        match self.sender.try_send(WriterEvent::Flush(notifier)) {
            Ok(()) => {}
            Err(TrySendError::Full(WriterEvent::Flush(notifier))) => {
                let max = self.capacity.unwrap_or_default();
                notifier.complete(Err(LoggerError::queue_full(self.sender.len(), max)));
            }
            Err(TrySendError::Disconnected(WriterEvent::Flush(notifier))) => {
                notifier.complete(Err(LoggerError::WriterDisconnected));
            }
            Err(_) => {}
        }

        completion
    }
}
