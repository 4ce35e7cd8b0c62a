//! Core logger types and traits

pub mod config;
pub mod error;
pub mod exception;
pub mod fields;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod log_writer;
pub mod logger;
pub mod metrics;
pub mod timestamp;
pub mod upload;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use log_context::LogContext;
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use log_writer::LogWriter;
pub use logger::{ContextLogger, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::{Clock, FixedClock, SystemClock, TimestampFormat};
pub use upload::{upload_channel, UploadCompletion, UploadNotifier};
