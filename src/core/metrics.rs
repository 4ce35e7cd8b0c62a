//! Logger metrics for observability
//!
//! One `LoggerMetrics` instance is shared by a root logger and every logger
//! derived from it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what happened to log calls
///
/// # Example
///
/// ```
/// use context_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_writer_panic();
///
/// assert_eq!(metrics.records_written(), 1);
/// assert_eq!(metrics.writer_panics(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records the writer accepted without panicking
    records_written: AtomicU64,

    /// Writer calls that panicked and were isolated
    writer_panics: AtomicU64,

    /// Errors whose report could not be rendered
    exceptions_omitted: AtomicU64,

    /// Forced uploads forwarded to the writer
    uploads_requested: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_written: AtomicU64::new(0),
            writer_panics: AtomicU64::new(0),
            exceptions_omitted: AtomicU64::new(0),
            uploads_requested: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn writer_panics(&self) -> u64 {
        self.writer_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn exceptions_omitted(&self) -> u64 {
        self.exceptions_omitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn uploads_requested(&self) -> u64 {
        self.uploads_requested.load(Ordering::Relaxed)
    }

    /// Record an accepted record, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.records_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_writer_panic(&self) -> u64 {
        self.writer_panics.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_exception_omitted(&self) -> u64 {
        self.exceptions_omitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_upload_requested(&self) -> u64 {
        self.uploads_requested.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of log calls whose writer panicked, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been logged.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.writer_panics() as f64;
        let total = self.records_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.records_written.store(0, Ordering::Relaxed);
        self.writer_panics.store(0, Ordering::Relaxed);
        self.exceptions_omitted.store(0, Ordering::Relaxed);
        self.uploads_requested.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            records_written: AtomicU64::new(self.records_written()),
            writer_panics: AtomicU64::new(self.writer_panics()),
            exceptions_omitted: AtomicU64::new(self.exceptions_omitted()),
            uploads_requested: AtomicU64::new(self.uploads_requested()),
        }
    }
}
