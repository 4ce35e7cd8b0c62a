//! # Context Logger
//!
//! A structured application logger built around an immutable, extendable
//! key-value context.
//!
//! ## Features
//!
//! - **Immutable Context**: Deriving a logger never changes its parent
//! - **Enrichment**: Every record carries message, timestamp, level and optional error report
//! - **Pluggable Writers**: Storage and transport live behind the [`LogWriter`] trait
//! - **Forced Uploads**: Deferred completion signals you can await or block on
//! - **Thread Safe**: Loggers, contexts and writers are shared freely across threads

pub mod core;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        fields, upload_channel, Clock, ContextLogger, FixedClock, LogContext, LogLevel,
        LogRecord, LogWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        Result, SystemClock, TimestampFormat, UploadCompletion, UploadNotifier,
    };
    pub use crate::writers::MemoryLogWriter;
    #[cfg(feature = "channel")]
    pub use crate::writers::{ChannelLogWriter, WriterEvent};
}

pub use crate::core::{
    fields, upload_channel, Clock, ContextLogger, FixedClock, LogContext, LogLevel, LogRecord,
    LogWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result,
    SystemClock, TimestampFormat, UploadCompletion, UploadNotifier,
};
pub use crate::writers::MemoryLogWriter;
#[cfg(feature = "channel")]
pub use crate::writers::{ChannelLogWriter, WriterEvent};
