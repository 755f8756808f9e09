//! The resolved configuration namespace.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::resolver::value::Value;
use crate::shared::error::SettingsError;

/// Flat mapping from configuration key to value.
///
/// Populated once during resolution and read-only afterwards; the hosting
/// framework may share it freely across threads. Keys iterate in sorted
/// order so serialized dumps are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Namespace {
    entries: BTreeMap<String, Value>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, overwriting any existing entry (last-write-wins).
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    fn required(&self, key: &str) -> Result<&Value, SettingsError> {
        self.get(key)
            .ok_or_else(|| SettingsError::MissingKey(key.to_owned()))
    }

    fn mismatch(key: &str, expected: &'static str, found: &Value) -> SettingsError {
        SettingsError::TypeMismatch {
            key: key.to_owned(),
            expected,
            found: found.kind(),
        }
    }

    /// Typed accessor for a string value.
    pub fn get_str(&self, key: &str) -> Result<&str, SettingsError> {
        let value = self.required(key)?;
        value
            .as_str()
            .ok_or_else(|| Self::mismatch(key, "string", value))
    }

    /// Typed accessor cloning a string value.
    pub fn get_string(&self, key: &str) -> Result<String, SettingsError> {
        self.get_str(key).map(str::to_owned)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, SettingsError> {
        let value = self.required(key)?;
        value
            .as_bool()
            .ok_or_else(|| Self::mismatch(key, "bool", value))
    }

    pub fn get_int(&self, key: &str) -> Result<i64, SettingsError> {
        let value = self.required(key)?;
        value
            .as_int()
            .ok_or_else(|| Self::mismatch(key, "int", value))
    }

    pub fn get_duration(&self, key: &str) -> Result<Duration, SettingsError> {
        let value = self.required(key)?;
        value
            .as_duration()
            .ok_or_else(|| Self::mismatch(key, "duration", value))
    }

    pub fn get_list(&self, key: &str) -> Result<Vec<String>, SettingsError> {
        let value = self.required(key)?;
        value
            .as_list()
            .map(<[String]>::to_vec)
            .ok_or_else(|| Self::mismatch(key, "list", value))
    }

    pub fn get_map(&self, key: &str) -> Result<&BTreeMap<String, Value>, SettingsError> {
        let value = self.required(key)?;
        value
            .as_map()
            .ok_or_else(|| Self::mismatch(key, "map", value))
    }

    /// Optional string accessor for keys only some override layers declare.
    pub fn get_opt_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_owned()))
                .ok_or_else(|| Self::mismatch(key, "string", value)),
        }
    }
}
