//! Immutable key-value context attached to every emitted log record
//!
//! A `LogContext` is a copy-on-write snapshot: [`LogContext::extend`] always
//! builds a fresh map and leaves the receiver untouched, so a context can be
//! shared freely between loggers living on different threads.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Immutable string-to-string mapping carried by a logger
///
/// # Example
///
/// ```
/// use context_logger::LogContext;
///
/// let base = LogContext::from([("application_id", "com.example.app")]);
/// let child = base.extend([("user_id", "u-42")]);
///
/// assert_eq!(child.get("application_id"), Some("com.example.app"));
/// assert_eq!(child.get("user_id"), Some("u-42"));
/// assert_eq!(base.get("user_id"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext {
    fields: Arc<BTreeMap<String, String>>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new context with every entry of `additional` inserted or overwritten
    ///
    /// Later entries win over earlier ones, both within `additional` and
    /// against the receiver.
    #[must_use]
    pub fn extend<I, K, V>(&self, additional: I) -> LogContext
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = BTreeMap::clone(&self.fields);
        for (key, value) in additional {
            fields.insert(key.into(), value.into());
        }
        LogContext {
            fields: Arc::new(fields),
        }
    }

    /// Return a new context with a single field inserted or overwritten
    #[must_use]
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> LogContext {
        self.extend([(key.into(), value.into())])
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the fields in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serialize as a flat JSON object
    pub fn to_json(&self) -> crate::core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<'a> IntoIterator for &'a LogContext {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        LogContext::new().extend(iter)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for LogContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for LogContext {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for LogContext {
    fn from(map: BTreeMap<String, String>) -> Self {
        LogContext {
            fields: Arc::new(map),
        }
    }
}
