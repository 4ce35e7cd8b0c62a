//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. They work with any
//! [`Logger`](crate::core::Logger).
//!
//! # Examples
//!
//! ```
//! use context_logger::prelude::*;
//! use context_logger::info;
//! use std::sync::Arc;
//!
//! let logger = ContextLogger::for_application("com.example.app", Arc::new(MemoryLogWriter::new()));
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level through a [`ContextLogger`](crate::ContextLogger).
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = ContextLogger::new(std::sync::Arc::new(MemoryLogWriter::new()), LogContext::new());
/// use context_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, &format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = ContextLogger::new(std::sync::Arc::new(MemoryLogWriter::new()), LogContext::new());
/// use context_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::core::Logger as _;
        $logger.debug(&format!($($arg)+))
    }};
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = ContextLogger::new(std::sync::Arc::new(MemoryLogWriter::new()), LogContext::new());
/// use context_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::core::Logger as _;
        $logger.info(&format!($($arg)+))
    }};
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = ContextLogger::new(std::sync::Arc::new(MemoryLogWriter::new()), LogContext::new());
/// use context_logger::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::core::Logger as _;
        $logger.warning(&format!($($arg)+))
    }};
}

/// Log an error-level message, optionally attaching an error value.
///
/// The `err =` value may be an owned error, a reference to one, or a
/// `Box<dyn Error>`; it is borrowed for the duration of the call.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = ContextLogger::new(std::sync::Arc::new(MemoryLogWriter::new()), LogContext::new());
/// use context_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
///
/// let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// error!(logger, err = io_err, "Could not persist {}", "session");
///
/// let boxed: Box<dyn std::error::Error + Send + Sync> = "quota exceeded".into();
/// error!(logger, err = boxed, "Upload rejected");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, err = $err:expr, $($arg:tt)+) => {{
        use $crate::core::exception::AsDynError as _;
        use $crate::core::Logger as _;
        $logger.error_with(&format!($($arg)+), Some($err.as_dyn_error()))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::core::Logger as _;
        $logger.error(&format!($($arg)+))
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{fields, ContextLogger, LogContext, LogLevel};
    use crate::writers::MemoryLogWriter;
    use std::sync::Arc;

    fn logger() -> (ContextLogger, Arc<MemoryLogWriter>) {
        let writer = Arc::new(MemoryLogWriter::new());
        (ContextLogger::new(writer.clone(), LogContext::new()), writer)
    }

    #[test]
    fn test_log_macro() {
        let (logger, writer) = logger();
        log!(logger, LogLevel::Info, "Formatted: {}", 42);

        let record = writer.last().unwrap();
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.message(), Some("Formatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (logger, writer) = logger();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warning!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);

        let rendered: Vec<_> = writer
            .records()
            .iter()
            .map(|r| r.get(fields::LOG_LEVEL).unwrap().to_string())
            .collect();
        assert_eq!(rendered, vec!["debug", "info", "warn", "error"]);
        assert_eq!(writer.last().unwrap().message(), Some("Code: 500"));
    }

    #[test]
    fn test_error_macro_with_attached_error() {
        let (logger, writer) = logger();
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.json missing");

        error!(logger, err = io_err, "Startup failed in {}", "loader");

        let record = writer.last().unwrap();
        assert_eq!(record.message(), Some("Startup failed in loader"));
        assert!(record.exception().unwrap().contains("config.json missing"));
    }

    #[test]
    fn test_error_macro_accepts_borrowed_and_boxed_errors() {
        let (logger, writer) = logger();
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "collector timed out");
        let boxed: Box<dyn std::error::Error + Send + Sync> = "quota exceeded".into();
        let plain: Box<dyn std::error::Error> = Box::new(std::fmt::Error);

        error!(logger, err = &io_err, "by reference");
        error!(logger, err = boxed, "boxed");
        error!(logger, err = &*plain, "reborrowed box");

        let records = writer.records();
        assert_eq!(records.len(), 3);
        assert!(records[0].exception().unwrap().contains("collector timed out"));
        assert!(records[1].exception().unwrap().contains("quota exceeded"));
        assert!(records[2].exception().is_some());
        assert_eq!(io_err.kind(), std::io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_macros_accept_references() {
        let (logger, writer) = logger();
        let borrowed = &logger;
        info!(borrowed, "through a reference");
        assert_eq!(writer.len(), 1);
    }
}
