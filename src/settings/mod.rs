//! # Settings Module
//!
//! The deployment's configuration surface: a base layer of declarations, one
//! override layer per environment, and a typed projection of the resolved
//! namespace. Configuration comes from:
//! - Environment variables (`DJANGO_SECRET_KEY`, `DB_*`, `REDIS_*`, ...)
//! - A `.env` file at the working directory (via dotenvy)
//! - Declared defaults in the base layer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use layered_settings::settings::Settings;
//!
//! let settings = Settings::load()?;
//! println!("cache at {}", settings.cache.location);
//! ```

mod base;
mod dev;
mod model;
mod prod;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::resolver::{dotenv_overlay, resolve, EnvChain, EnvSource, Layer, Namespace, ProcessEnv};
use crate::shared::error::SettingsError;

pub use model::{
    CacheSettings, ChannelLayerSettings, DatabaseSettings, JwtSettings, LocaleSettings,
    MediaSettings, RedisSettings, SecuritySettings, SessionSettings, Settings,
    StaticFileSettings, TaskQueueSettings,
};

/// Which override layer to apply. Exactly one per process, chosen by the
/// `RUN_ENV` environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Read the environment selector, defaulting to development.
    pub fn detect(env: &dyn EnvSource) -> Self {
        match env.get("RUN_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// The override layer for this environment.
    pub fn overrides(&self) -> Layer {
        match self {
            Environment::Development => dev::overrides(),
            Environment::Production => prod::overrides(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Settings {
    /// Load settings from the process environment and an optional `.env`
    /// file in the working directory.
    ///
    /// The loading order is:
    /// 1. `.env` file, parsed into an overlay (already-exported variables win)
    /// 2. Base layer declarations (defaults and environment lookups)
    /// 3. Override layer selected by `RUN_ENV`
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the `.env` file is malformed or the
    /// resolved namespace does not project into the typed surface.
    pub fn load() -> Result<Self, SettingsError> {
        let overlay = dotenv_overlay(Path::new(".env"))?;
        Self::load_from(&EnvChain::new(ProcessEnv, overlay))
    }

    /// Load settings against an explicit environment source.
    pub fn load_from(env: &dyn EnvSource) -> Result<Self, SettingsError> {
        let environment = Environment::detect(env);
        let namespace = resolve_namespace(environment, env);

        tracing::info!(
            environment = %environment,
            keys = namespace.len(),
            "Configuration resolved"
        );

        Self::from_namespace(environment, &namespace)
    }
}

/// Resolve the raw namespace for an environment without projecting it.
pub fn resolve_namespace(environment: Environment, env: &dyn EnvSource) -> Namespace {
    resolve(&base::layer(), &environment.overrides(), env)
}
