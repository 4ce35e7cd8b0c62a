//! Main logger implementation

use super::{
    config::LoggerConfig,
    exception,
    fields,
    log_context::LogContext,
    log_level::LogLevel,
    log_writer::LogWriter,
    metrics::LoggerMetrics,
    timestamp::{system_clock, Clock, TimestampFormat},
    upload::UploadCompletion,
    LoggerError,
};
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Capability surface shared by every logger
///
/// Log calls never fail from the caller's point of view; only
/// [`force_log_upload`](Logger::force_log_upload) can report an error, and it
/// does so through the returned completion.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);

    fn info(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str) {
        self.error_with(message, None);
    }

    /// Log at error level, attaching the report of `error` when present
    fn error_with(&self, message: &str, error: Option<&(dyn Error + 'static)>);

    /// Derive a logger that shares this one's writer and carries more context
    fn extend_context<I, K, V>(&self, additional: I) -> Self
    where
        Self: Sized,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>;

    fn force_log_upload(&self) -> UploadCompletion;

    fn with_user_id(&self, user_id: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.extend_context([(fields::USER_ID.to_string(), user_id.into())])
    }

    fn with_tag(&self, tag: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.extend_context([(fields::TAG.to_string(), tag.into())])
    }
}

/// Logger that enriches an immutable context and hands it to a [`LogWriter`]
///
/// Cloning or deriving a `ContextLogger` shares the writer, clock and metrics.
///
/// # Example
///
/// ```
/// use context_logger::prelude::*;
/// use std::sync::Arc;
///
/// let writer = Arc::new(MemoryLogWriter::new());
/// let logger = ContextLogger::for_application("com.example.app", writer.clone());
///
/// logger.with_user_id("u-42").info("signed in");
///
/// let record = writer.last().unwrap();
/// assert_eq!(record.get("user_id"), Some("u-42"));
/// assert_eq!(record.get("log_level"), Some("info"));
/// ```
#[derive(Clone)]
pub struct ContextLogger {
    writer: Arc<dyn LogWriter>,
    context: LogContext,
    clock: Arc<dyn Clock>,
    timestamp_format: TimestampFormat,
    metrics: Arc<LoggerMetrics>,
}

impl ContextLogger {
    /// Root logger with an explicit initial context
    #[must_use]
    pub fn new(writer: Arc<dyn LogWriter>, context: LogContext) -> Self {
        Self {
            writer,
            context,
            clock: system_clock(),
            timestamp_format: TimestampFormat::default(),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Root logger whose context holds only the application id
    #[must_use]
    pub fn for_application(application_id: impl Into<String>, writer: Arc<dyn LogWriter>) -> Self {
        Self::new(
            writer,
            LogContext::new().with(fields::APPLICATION_ID, application_id),
        )
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        self.timestamp_format
    }

    /// Metrics shared with every logger derived from the same root
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log at an arbitrary level
    pub fn log(&self, level: LogLevel, message: &str) {
        if level == LogLevel::Error {
            self.error_with(message, None);
        } else {
            let context = self.enrich(level, message);
            self.emit(level, context);
        }
    }

    /// Held context plus message, timestamp and level, in that order
    fn enrich(&self, level: LogLevel, message: &str) -> LogContext {
        let timestamp = self.timestamp_format.format(&self.clock.now());
        self.context.extend([
            (fields::MESSAGE, message.to_string()),
            (fields::TIMESTAMP, timestamp),
            (fields::LOG_LEVEL, level.as_str().to_string()),
        ])
    }

    /// Hand the record to the writer with panic isolation
    fn emit(&self, level: LogLevel, context: LogContext) {
        let writer = &self.writer;
        let result = panic::catch_unwind(AssertUnwindSafe(|| writer.write(level, context)));

        match result {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(panic_info) => {
                let previous = self.metrics.record_writer_panic();
                // Alert on first panic and periodically thereafter
                if previous == 0 || (previous + 1) % 1000 == 0 {
                    eprintln!(
                        "[LOGGER CRITICAL] Log writer panicked ({} total): {}. \
                         The log call returned normally.",
                        previous + 1,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Logger for ContextLogger {
    #[inline]
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error_with(&self, message: &str, error: Option<&(dyn Error + 'static)>) {
        let mut context = self.enrich(LogLevel::Error, message);

        if let Some(error) = error {
            match exception::render_error(error) {
                Some(report) => context = context.with(fields::EXCEPTION, report),
                None => {
                    self.metrics.record_exception_omitted();
                    eprintln!(
                        "[LOGGER WARNING] Failed to render attached error; \
                         record emitted without the '{}' field",
                        fields::EXCEPTION
                    );
                }
            }
        }

        self.emit(LogLevel::Error, context);
    }

    fn extend_context<I, K, V>(&self, additional: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            writer: Arc::clone(&self.writer),
            context: self.context.extend(additional),
            clock: Arc::clone(&self.clock),
            timestamp_format: self.timestamp_format,
            metrics: Arc::clone(&self.metrics),
        }
    }

    fn force_log_upload(&self) -> UploadCompletion {
        self.metrics.record_upload_requested();

        let writer = &self.writer;
        match panic::catch_unwind(AssertUnwindSafe(|| writer.force_upload())) {
            Ok(completion) => completion,
            Err(panic_info) => UploadCompletion::failed(LoggerError::upload_failed(format!(
                "log writer panicked: {}",
                panic_message(panic_info.as_ref())
            ))),
        }
    }
}

impl fmt::Debug for ContextLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextLogger")
            .field("context", &self.context)
            .field("timestamp_format", &self.timestamp_format)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a root [`ContextLogger`] with a fluent API
///
/// # Example
/// ```
/// use context_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = ContextLogger::builder(Arc::new(MemoryLogWriter::new()))
///     .application_id("com.example.app")
///     .tag("sync")
///     .field("build", "1042")
///     .timestamp_format(TimestampFormat::Iso8601Micros)
///     .build();
///
/// assert_eq!(logger.context().get("tag"), Some("sync"));
/// ```
pub struct LoggerBuilder {
    writer: Arc<dyn LogWriter>,
    context: LogContext,
    clock: Arc<dyn Clock>,
    timestamp_format: TimestampFormat,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new(writer: Arc<dyn LogWriter>) -> Self {
        Self {
            writer,
            context: LogContext::new(),
            clock: system_clock(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn application_id(self, application_id: impl Into<String>) -> Self {
        self.field(fields::APPLICATION_ID, application_id)
    }

    #[must_use = "builder methods return a new value"]
    pub fn tag(self, tag: impl Into<String>) -> Self {
        self.field(fields::TAG, tag)
    }

    #[must_use = "builder methods return a new value"]
    pub fn user_id(self, user_id: impl Into<String>) -> Self {
        self.field(fields::USER_ID, user_id)
    }

    /// Add one field to the root context
    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context = self.context.with(key, value);
        self
    }

    /// Merge a whole context into the root context
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: LogContext) -> Self {
        self.context = self.context.extend(&context);
        self
    }

    /// Replace the wall-clock source used for the `timestamp` field
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Apply a declarative configuration
    ///
    /// Context entries are merged first, then the identity fields, so an
    /// explicit `application_id` or `tag` wins over the same key in `context`.
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.context = self.context.extend(config.context);
        if let Some(application_id) = config.application_id {
            self.context = self.context.with(fields::APPLICATION_ID, application_id);
        }
        if let Some(tag) = config.tag {
            self.context = self.context.with(fields::TAG, tag);
        }
        self.timestamp_format = config.timestamp_format;
        self
    }

    /// Build the root logger
    pub fn build(self) -> ContextLogger {
        ContextLogger {
            writer: self.writer,
            context: self.context,
            clock: self.clock,
            timestamp_format: self.timestamp_format,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl ContextLogger {
    /// Create a builder for a root logger
    #[must_use]
    pub fn builder(writer: Arc<dyn LogWriter>) -> LoggerBuilder {
        LoggerBuilder::new(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::writers::MemoryLogWriter;
    use chrono::TimeZone;
    use std::io;

    fn fixed_clock() -> Arc<FixedClock> {
        let start = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        Arc::new(FixedClock::new(start))
    }

    fn logger_with(writer: &Arc<MemoryLogWriter>) -> ContextLogger {
        ContextLogger::builder(writer.clone())
            .application_id("com.example.app")
            .tag("test")
            .clock(fixed_clock())
            .build()
    }

    struct PanickingWriter;

    impl LogWriter for PanickingWriter {
        fn write(&self, _level: LogLevel, _context: LogContext) {
            panic!("disk on fire");
        }

        fn force_upload(&self) -> UploadCompletion {
            panic!("no network");
        }
    }

    #[test]
    fn test_enrichment_fields() {
        let writer = Arc::new(MemoryLogWriter::new());
        logger_with(&writer).warning("cache miss");

        let record = writer.last().unwrap();
        assert_eq!(record.level, LogLevel::Warning);
        assert_eq!(record.get(fields::APPLICATION_ID), Some("com.example.app"));
        assert_eq!(record.get(fields::TAG), Some("test"));
        assert_eq!(record.get(fields::MESSAGE), Some("cache miss"));
        assert_eq!(record.get(fields::LOG_LEVEL), Some("warn"));
        assert_eq!(record.get(fields::TIMESTAMP), Some("2025-01-08T10:30:45.000Z"));
        assert_eq!(record.get(fields::EXCEPTION), None);
    }

    #[test]
    fn test_log_dispatches_by_level() {
        let writer = Arc::new(MemoryLogWriter::new());
        let logger = logger_with(&writer);

        for level in LogLevel::ALL {
            logger.log(level, "m");
        }

        let levels: Vec<_> = writer.records().iter().map(|r| r.level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_error_with_attaches_report() {
        let writer = Arc::new(MemoryLogWriter::new());
        let error = io::Error::new(io::ErrorKind::Other, "Test runtime error");

        logger_with(&writer).error_with("sync failed", Some(&error));

        let record = writer.last().unwrap();
        assert_eq!(record.level, LogLevel::Error);
        assert_eq!(record.get(fields::LOG_LEVEL), Some("error"));
        assert!(record.exception().unwrap().contains("Test runtime error"));
    }

    #[derive(Debug)]
    struct UnprintableError;

    impl fmt::Display for UnprintableError {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    impl Error for UnprintableError {}

    #[test]
    fn test_unrenderable_error_omits_exception() {
        let writer = Arc::new(MemoryLogWriter::new());
        let logger = logger_with(&writer);

        logger.error_with("x", Some(&UnprintableError));

        assert_eq!(writer.len(), 1);
        let record = writer.last().unwrap();
        assert_eq!(record.level, LogLevel::Error);
        assert_eq!(record.message(), Some("x"));
        assert_eq!(record.get(fields::LOG_LEVEL), Some("error"));
        assert!(!record.context.contains_key(fields::EXCEPTION));
        assert_eq!(logger.metrics().exceptions_omitted(), 1);
        assert_eq!(logger.metrics().records_written(), 1);
    }

    #[test]
    fn test_caller_exception_field_survives_plain_error() {
        let writer = Arc::new(MemoryLogWriter::new());
        let logger = logger_with(&writer).extend_context([(fields::EXCEPTION, "preset")]);

        logger.error("no error attached");
        assert_eq!(writer.last().unwrap().exception(), Some("preset"));
    }

    #[test]
    fn test_call_fields_override_context() {
        let writer = Arc::new(MemoryLogWriter::new());
        let logger = logger_with(&writer).extend_context([
            (fields::MESSAGE, "stale"),
            (fields::LOG_LEVEL, "fatal"),
            (fields::TIMESTAMP, "yesterday"),
        ]);

        logger.info("fresh");

        let record = writer.last().unwrap();
        assert_eq!(record.message(), Some("fresh"));
        assert_eq!(record.get(fields::LOG_LEVEL), Some("info"));
        assert_eq!(record.timestamp(), Some("2025-01-08T10:30:45.000Z"));
    }

    #[test]
    fn test_clock_is_read_per_call() {
        let writer = Arc::new(MemoryLogWriter::new());
        let clock = fixed_clock();
        let logger = ContextLogger::builder(writer.clone())
            .clock(clock.clone())
            .build();

        logger.info("first");
        clock.advance(chrono::Duration::milliseconds(250));
        logger.info("second");

        let records = writer.records();
        assert_eq!(records[0].timestamp(), Some("2025-01-08T10:30:45.000Z"));
        assert_eq!(records[1].timestamp(), Some("2025-01-08T10:30:45.250Z"));
    }

    #[test]
    fn test_writer_panic_is_isolated() {
        let logger = ContextLogger::new(Arc::new(PanickingWriter), LogContext::new());

        logger.info("still returns");
        logger.error("also returns");

        assert_eq!(logger.metrics().writer_panics(), 2);
        assert_eq!(logger.metrics().records_written(), 0);
    }

    #[test]
    fn test_force_upload_panic_becomes_failure() {
        let logger = ContextLogger::new(Arc::new(PanickingWriter), LogContext::new());

        let result = logger.force_log_upload().wait();
        match result {
            Err(LoggerError::UploadFailed { reason }) => assert!(reason.contains("no network")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_metrics_shared_with_derived_loggers() {
        let writer = Arc::new(MemoryLogWriter::new());
        let root = logger_with(&writer);
        let child = root.with_user_id("u1");

        root.info("a");
        child.info("b");
        let _ = child.force_log_upload();

        assert_eq!(root.metrics().records_written(), 2);
        assert_eq!(root.metrics().uploads_requested(), 1);
    }

    #[test]
    fn test_builder_config() {
        let writer = Arc::new(MemoryLogWriter::new());
        let config = LoggerConfig::from_json(
            r#"{
                "application_id": "com.example.app",
                "tag": "sync",
                "context": { "tag": "overridden", "build": "1042" },
                "timestamp_format": "rfc3339"
            }"#,
        )
        .unwrap();

        let logger = ContextLogger::builder(writer.clone())
            .clock(fixed_clock())
            .config(config)
            .build();
        logger.debug("configured");

        let record = writer.last().unwrap();
        assert_eq!(record.get(fields::APPLICATION_ID), Some("com.example.app"));
        assert_eq!(record.get(fields::TAG), Some("sync"));
        assert_eq!(record.get("build"), Some("1042"));
        assert_eq!(record.timestamp(), Some("2025-01-08T10:30:45.000+00:00"));
    }

    #[test]
    fn test_builder_merges_owned_context() {
        let writer = Arc::new(MemoryLogWriter::new());
        let shared = LogContext::from([("region", "eu-west-1"), (fields::TAG, "from-context")]);

        let logger = ContextLogger::builder(writer.clone())
            .tag("sync")
            .context(shared.clone())
            .build();
        logger.info("merged");

        let record = writer.last().unwrap();
        assert_eq!(record.get("region"), Some("eu-west-1"));
        assert_eq!(record.get(fields::TAG), Some("from-context"));
        assert_eq!(shared.len(), 2);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let writer = Arc::new(MemoryLogWriter::new());
        let logger: Box<dyn Logger> = Box::new(logger_with(&writer));

        logger.debug("via dyn");
        logger.error("via dyn");

        assert_eq!(writer.len(), 2);
    }
}
