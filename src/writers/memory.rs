//! In-memory writer
//!
//! Keeps every record it receives. Useful as a test double and for inspecting
//! what a logger emits.

use crate::core::{
    LogContext, LogLevel, LogRecord, LogWriter, LoggerError, UploadCompletion,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct MemoryLogWriter {
    records: Mutex<Vec<LogRecord>>,
    uploads: AtomicUsize,
    upload_failure: Option<String>,
}

impl MemoryLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer whose forced uploads always fail with `reason`
    pub fn failing_uploads(reason: impl Into<String>) -> Self {
        Self {
            upload_failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Snapshot of the records received so far, in arrival order
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn last(&self) -> Option<LogRecord> {
        self.records.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Remove and return every stored record
    pub fn drain(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Number of `force_upload` calls received
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

impl LogWriter for MemoryLogWriter {
    fn write(&self, level: LogLevel, context: LogContext) {
        self.records.lock().push(LogRecord::new(level, context));
    }

    fn force_upload(&self) -> UploadCompletion {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        match &self.upload_failure {
            Some(reason) => UploadCompletion::failed(LoggerError::upload_failed(reason.clone())),
            None => UploadCompletion::succeeded(),
        }
    }
}
