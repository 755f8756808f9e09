//! Configuration value types.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

/// A single resolved configuration value.
///
/// The namespace is deliberately loosely typed: a value is whatever the
/// declaring layer said it is, and the typed projection layer is responsible
/// for rejecting values of the wrong shape at the point of use.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag (e.g., debug mode, secure-cookie toggles)
    Bool(bool),

    /// Integer (e.g., worker concurrency)
    Int(i64),

    /// Duration, serialized as whole seconds
    Duration(#[serde(serialize_with = "duration_secs::serialize")] Duration),

    /// String (connection parameters, backend selectors, URLs)
    Str(String),

    /// List of strings (hostname allowlists, middleware chains)
    List(Vec<String>),

    /// Nested mapping (backend option blocks)
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Build a string value.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Build a list value from anything yielding string-likes.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// An empty string, the stand-in for an absent environment variable.
    pub fn empty() -> Self {
        Value::Str(String::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Render a scalar value for template interpolation.
    ///
    /// Lists and maps have no single-string rendering and yield `None`;
    /// templates referencing them interpolate an empty string instead.
    pub(crate) fn render(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Duration(d) => Some(d.as_secs().to_string()),
            Value::List(_) | Value::Map(_) => None,
        }
    }

    /// Human-readable name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Duration(_) => "duration",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

/// Serde helper serializing a `Duration` as whole seconds.
pub mod duration_secs {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(d.as_secs())
    }
}
