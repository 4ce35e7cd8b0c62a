//! Reserved field keys written by the logger
//!
//! These share the context map with caller-supplied fields. `MESSAGE`,
//! `TIMESTAMP` and `LOG_LEVEL` are overwritten on every emission; the
//! identity fields are set once and carried through derivation.

pub const APPLICATION_ID: &str = "application_id";
pub const TAG: &str = "tag";
pub const USER_ID: &str = "user_id";
pub const MESSAGE: &str = "message";
pub const TIMESTAMP: &str = "timestamp";
pub const LOG_LEVEL: &str = "log_level";
pub const EXCEPTION: &str = "exception";

