//! Emitted record structure

use super::error::Result;
use super::fields;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// The `(level, context)` pair a writer receives for one log call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub context: LogContext,
}

impl LogRecord {
    pub fn new(level: LogLevel, context: LogContext) -> Self {
        Self { level, context }
    }

    pub fn message(&self) -> Option<&str> {
        self.context.get(fields::MESSAGE)
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.context.get(fields::TIMESTAMP)
    }

    pub fn exception(&self) -> Option<&str> {
        self.context.get(fields::EXCEPTION)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.context.get(key)
    }

    /// Convert to JSON string (single line)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
