//! Declarative logger configuration
//!
//! `LoggerConfig` is the serializable counterpart of
//! [`LoggerBuilder`](crate::core::LoggerBuilder), for applications that keep
//! their logging identity in a config file.

use super::error::{LoggerError, Result};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// # Example
///
/// ```
/// use context_logger::{LoggerConfig, TimestampFormat};
///
/// let config = LoggerConfig::from_json(r#"{
///     "application_id": "com.example.app",
///     "tag": "sync",
///     "context": { "build": "1042" },
///     "timestamp_format": "iso8601_micros"
/// }"#).unwrap();
///
/// assert_eq!(config.application_id.as_deref(), Some("com.example.app"));
/// assert_eq!(config.timestamp_format, TimestampFormat::Iso8601Micros);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub application_id: Option<String>,
    pub tag: Option<String>,
    /// Extra fields merged into the root context
    pub context: BTreeMap<String, String>,
    pub timestamp_format: TimestampFormat,
}

impl LoggerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Identity fields, when present, must be non-empty
    pub fn validate(&self) -> Result<()> {
        if matches!(self.application_id.as_deref(), Some("")) {
            return Err(LoggerError::config(
                "LoggerConfig",
                "application_id must not be empty",
            ));
        }
        if matches!(self.tag.as_deref(), Some("")) {
            return Err(LoggerError::config("LoggerConfig", "tag must not be empty"));
        }
        Ok(())
    }
}
