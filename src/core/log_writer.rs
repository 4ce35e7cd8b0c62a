//! Writer trait for log destinations

use super::{log_context::LogContext, log_level::LogLevel, upload::UploadCompletion};
use std::sync::Arc;

/// Destination for enriched log records
///
/// One writer is shared by a root logger and every logger derived from it,
/// possibly across threads, so implementations do their own synchronization.
/// `write` must not block the caller indefinitely.
///
/// # Example
///
/// ```
/// use context_logger::core::{LogContext, LogLevel, LogWriter, UploadCompletion};
///
/// struct StderrWriter;
///
/// impl LogWriter for StderrWriter {
///     fn write(&self, level: LogLevel, context: LogContext) {
///         eprintln!("{} {}", level, context);
///     }
///
///     fn force_upload(&self) -> UploadCompletion {
///         UploadCompletion::succeeded()
///     }
/// }
/// ```
pub trait LogWriter: Send + Sync {
    /// Accept one fully enriched record
    fn write(&self, level: LogLevel, context: LogContext);

    /// Flush buffered records to the remote collector out of band
    fn force_upload(&self) -> UploadCompletion;
}

impl<W: LogWriter + ?Sized> LogWriter for Arc<W> {
    fn write(&self, level: LogLevel, context: LogContext) {
        (**self).write(level, context)
    }

    fn force_upload(&self) -> UploadCompletion {
        (**self).force_upload()
    }
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn write(&self, level: LogLevel, context: LogContext) {
        (**self).write(level, context)
    }

    fn force_upload(&self) -> UploadCompletion {
        (**self).force_upload()
    }
}
