//! Environment variable sources.
//!
//! Resolution reads environment variables through the [`EnvSource`] trait
//! instead of touching `std::env` directly. This keeps the resolver testable
//! (tests resolve against an in-memory map, never mutating process state) and
//! lets a parsed `.env` file sit underneath the real process environment.

use std::collections::HashMap;
use std::path::Path;

use crate::shared::error::SettingsError;

/// A read-only source of environment variables.
pub trait EnvSource {
    /// Look up a variable, returning `None` when unset.
    fn get(&self, var: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, var: &str) -> Option<String> {
        std::env::var(var).ok()
    }
}

/// An in-memory environment, used for `.env` overlays and in tests.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(var.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for MapEnv {
    fn get(&self, var: &str) -> Option<String> {
        self.vars.get(var).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Two sources chained: `primary` wins, `fallback` fills the gaps.
///
/// Mirrors the original deployment's non-overriding dotenv load, where an
/// already-exported variable takes precedence over the `.env` file.
#[derive(Debug, Clone)]
pub struct EnvChain<P, F> {
    primary: P,
    fallback: F,
}

impl<P: EnvSource, F: EnvSource> EnvChain<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: EnvSource, F: EnvSource> EnvSource for EnvChain<P, F> {
    fn get(&self, var: &str) -> Option<String> {
        self.primary.get(var).or_else(|| self.fallback.get(var))
    }
}

/// Parse a `.env` file into an in-memory overlay.
///
/// The file is read through dotenvy's iterator API rather than loaded into
/// the process environment, so repeated loads stay deterministic. A missing
/// file yields an empty overlay; a malformed line is an error.
pub fn dotenv_overlay(path: &Path) -> Result<MapEnv, SettingsError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No .env file found");
        return Ok(MapEnv::new());
    }

    let mut vars = HashMap::new();
    for entry in dotenvy::from_path_iter(path)? {
        let (key, value) = entry?;
        vars.insert(key, value);
    }

    tracing::debug!(path = %path.display(), count = vars.len(), ".env file loaded");
    Ok(MapEnv { vars })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn map_env_lookup() {
        let env = MapEnv::new().set("REDIS_HOST", "cache.internal");
        assert_eq!(env.get("REDIS_HOST"), Some("cache.internal".into()));
        assert_eq!(env.get("REDIS_PORT"), None);
    }

    #[test]
    fn chain_prefers_primary() {
        let primary = MapEnv::new().set("DB_NAME", "from_process");
        let fallback: MapEnv = [("DB_NAME", "from_file"), ("DB_USER", "app")]
            .into_iter()
            .collect();
        let chain = EnvChain::new(primary, fallback);

        assert_eq!(chain.get("DB_NAME"), Some("from_process".into()));
        assert_eq!(chain.get("DB_USER"), Some("app".into()));
        assert_eq!(chain.get("DB_HOST"), None);
    }

    #[test]
    fn missing_dotenv_file_is_empty_overlay() {
        let overlay = dotenv_overlay(Path::new("/nonexistent/.env")).unwrap();
        assert!(overlay.is_empty());
    }

    #[test]
    fn dotenv_file_parses_key_value_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "DB_NAME=app_db").unwrap();
        writeln!(file, "DB_PORT=5432").unwrap();
        file.flush().unwrap();

        let overlay = dotenv_overlay(file.path()).unwrap();
        assert_eq!(overlay.get("DB_NAME"), Some("app_db".into()));
        assert_eq!(overlay.get("DB_PORT"), Some("5432".into()));
    }
}
