//! Error types for the logger system

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The writer reported a failed upload
    #[error("Log upload failed: {reason}")]
    UploadFailed { reason: String },

    /// The writer dropped the upload request without answering it
    #[error("Log upload abandoned before completion")]
    UploadAbandoned,

    /// Waiting on an upload gave up
    #[error("Log upload did not complete within {timeout:?}")]
    UploadTimeout { timeout: Duration },

    /// The outcome of an upload was already taken
    #[error("Upload completion already consumed")]
    CompletionConsumed,

    /// The receiving side of a writer is gone
    #[error("Log writer disconnected")]
    WriterDisconnected,

    /// Queue full with buffer details
    #[error("Log queue full: {current}/{max} messages buffered")]
    QueueFull { current: usize, max: usize },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an upload failure with the writer's reason
    pub fn upload_failed(reason: impl Into<String>) -> Self {
        LoggerError::UploadFailed {
            reason: reason.into(),
        }
    }

    /// Create an upload timeout error
    pub fn upload_timeout(timeout: Duration) -> Self {
        LoggerError::UploadTimeout { timeout }
    }

    /// Create a queue full error with buffer details
    pub fn queue_full(current: usize, max: usize) -> Self {
        LoggerError::QueueFull { current, max }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}
