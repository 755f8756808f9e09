//! Typed settings structures.
//!
//! A typed projection of the resolved namespace, grouped the way the hosting
//! framework consumes it. Projection is where missing or mistyped keys are
//! reported; the resolver itself stays validation-free.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::resolver::{duration_secs, Namespace};
use crate::settings::Environment;
use crate::shared::error::SettingsError;

/// Root settings structure containing the full configuration surface.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Which override layer was applied
    pub environment: Environment,

    /// Debug mode flag
    pub debug: bool,

    /// Cryptographic signing key for the hosting framework
    pub secret_key: String,

    /// Hostname allowlist
    pub allowed_hosts: Vec<String>,

    /// Installed framework subsystems
    pub installed_apps: Vec<String>,

    /// Middleware chain
    pub middleware: Vec<String>,

    /// Database connection parameters
    pub database: DatabaseSettings,

    /// Password validation policy
    pub password_validators: Vec<String>,

    /// Locale and timezone
    pub locale: LocaleSettings,

    /// Static file serving
    pub static_files: StaticFileSettings,

    /// Media file serving
    pub media: MediaSettings,

    /// Redis connection parameters
    pub redis: RedisSettings,

    /// Cache backend selection
    pub cache: CacheSettings,

    /// Session backend selection
    pub session: SessionSettings,

    /// Channel layer (pub/sub transport)
    pub channels: ChannelLayerSettings,

    /// Background task queue
    pub task_queue: TaskQueueSettings,

    /// Authentication token lifetimes
    pub jwt: JwtSettings,

    /// HTTPS security toggles
    pub security: SecuritySettings,
}

/// Database connection parameters.
///
/// All values are environment-derived strings; an empty string means the
/// variable was unset, and rejecting that is the database client's concern.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseSettings {
    pub engine: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
}

/// Locale and timezone configuration.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleSettings {
    pub language_code: String,
    pub time_zone: String,
    pub use_i18n: bool,
    pub use_tz: bool,
}

/// Static file configuration.
#[derive(Debug, Clone, Serialize)]
pub struct StaticFileSettings {
    pub url: String,
    pub dirs: Vec<String>,

    /// Collection root, only declared by the production layer
    pub root: Option<String>,
}

/// Media file configuration.
#[derive(Debug, Clone, Serialize)]
pub struct MediaSettings {
    pub url: String,
    pub root: String,
}

/// Redis connection parameters shared by cache, channels, and task queue.
#[derive(Debug, Clone, Serialize)]
pub struct RedisSettings {
    pub host: String,
    pub port: String,

    /// Logical database index for the cache
    pub db_cache: String,

    /// Logical database index for the channel layer
    pub db_channels: String,
}

/// Cache backend configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSettings {
    pub backend: String,

    /// Full connection URL, e.g. `redis://redis:6379/1`
    pub location: String,

    pub options: BTreeMap<String, String>,
}

/// Session backend configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSettings {
    pub engine: String,
    pub cache_alias: String,
}

/// Channel layer (pub/sub transport) configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelLayerSettings {
    pub backend: String,
    pub hosts: Vec<String>,
}

/// Background task queue configuration.
#[derive(Debug, Clone, Serialize)]
pub struct TaskQueueSettings {
    pub broker_url: String,
    pub result_backend: String,
    pub timezone: String,
    pub enable_utc: bool,
    pub accept_content: Vec<String>,
    pub task_serializer: String,
    pub result_serializer: String,

    /// Hard task execution limit
    #[serde(serialize_with = "duration_secs::serialize")]
    pub task_time_limit: Duration,

    /// Soft task execution limit
    #[serde(serialize_with = "duration_secs::serialize")]
    pub task_soft_time_limit: Duration,

    pub default_queue: String,
    pub worker_concurrency: u32,
}

/// Authentication token lifetimes.
#[derive(Debug, Clone, Serialize)]
pub struct JwtSettings {
    #[serde(serialize_with = "duration_secs::serialize")]
    pub access_token_lifetime: Duration,

    #[serde(serialize_with = "duration_secs::serialize")]
    pub refresh_token_lifetime: Duration,
}

/// HTTPS security toggles.
#[derive(Debug, Clone, Serialize)]
pub struct SecuritySettings {
    pub ssl_redirect: bool,
    pub session_cookie_secure: bool,
    pub csrf_cookie_secure: bool,
}

impl Settings {
    /// Project a resolved namespace into typed settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` when a key is missing from the namespace or
    /// holds a value of the wrong shape.
    pub fn from_namespace(
        environment: Environment,
        namespace: &Namespace,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            environment,
            debug: namespace.get_bool("debug")?,
            secret_key: namespace.get_string("secret_key")?,
            allowed_hosts: namespace.get_list("allowed_hosts")?,
            installed_apps: namespace.get_list("installed_apps")?,
            middleware: namespace.get_list("middleware")?,
            database: DatabaseSettings {
                engine: namespace.get_string("database.engine")?,
                name: namespace.get_string("database.name")?,
                user: namespace.get_string("database.user")?,
                password: namespace.get_string("database.password")?,
                host: namespace.get_string("database.host")?,
                port: namespace.get_string("database.port")?,
            },
            password_validators: namespace.get_list("auth.password_validators")?,
            locale: LocaleSettings {
                language_code: namespace.get_string("locale.language_code")?,
                time_zone: namespace.get_string("locale.time_zone")?,
                use_i18n: namespace.get_bool("locale.use_i18n")?,
                use_tz: namespace.get_bool("locale.use_tz")?,
            },
            static_files: StaticFileSettings {
                url: namespace.get_string("static.url")?,
                dirs: namespace.get_list("static.dirs")?,
                root: namespace.get_opt_string("static.root")?,
            },
            media: MediaSettings {
                url: namespace.get_string("media.url")?,
                root: namespace.get_string("media.root")?,
            },
            redis: RedisSettings {
                host: namespace.get_string("redis.host")?,
                port: namespace.get_string("redis.port")?,
                db_cache: namespace.get_string("redis.db_cache")?,
                db_channels: namespace.get_string("redis.db_channels")?,
            },
            cache: CacheSettings {
                backend: namespace.get_string("cache.backend")?,
                location: namespace.get_string("cache.location")?,
                options: string_map(namespace, "cache.options")?,
            },
            session: SessionSettings {
                engine: namespace.get_string("session.engine")?,
                cache_alias: namespace.get_string("session.cache_alias")?,
            },
            channels: ChannelLayerSettings {
                backend: namespace.get_string("channels.backend")?,
                hosts: namespace.get_list("channels.hosts")?,
            },
            task_queue: TaskQueueSettings {
                broker_url: namespace.get_string("task_queue.broker_url")?,
                result_backend: namespace.get_string("task_queue.result_backend")?,
                timezone: namespace.get_string("task_queue.timezone")?,
                enable_utc: namespace.get_bool("task_queue.enable_utc")?,
                accept_content: namespace.get_list("task_queue.accept_content")?,
                task_serializer: namespace.get_string("task_queue.task_serializer")?,
                result_serializer: namespace.get_string("task_queue.result_serializer")?,
                task_time_limit: namespace.get_duration("task_queue.task_time_limit")?,
                task_soft_time_limit: namespace.get_duration("task_queue.task_soft_time_limit")?,
                default_queue: namespace.get_string("task_queue.default_queue")?,
                worker_concurrency: non_negative(
                    namespace,
                    "task_queue.worker_concurrency",
                )?,
            },
            jwt: JwtSettings {
                access_token_lifetime: namespace.get_duration("jwt.access_token_lifetime")?,
                refresh_token_lifetime: namespace.get_duration("jwt.refresh_token_lifetime")?,
            },
            security: SecuritySettings {
                ssl_redirect: namespace.get_bool("security.ssl_redirect")?,
                session_cookie_secure: namespace.get_bool("security.session_cookie_secure")?,
                csrf_cookie_secure: namespace.get_bool("security.csrf_cookie_secure")?,
            },
        })
    }
}

fn non_negative(namespace: &Namespace, key: &str) -> Result<u32, SettingsError> {
    let raw = namespace.get_int(key)?;
    u32::try_from(raw).map_err(|_| SettingsError::InvalidValue {
        key: key.to_owned(),
        reason: format!("expected a non-negative integer, found {raw}"),
    })
}

fn string_map(namespace: &Namespace, key: &str) -> Result<BTreeMap<String, String>, SettingsError> {
    namespace
        .get_map(key)?
        .iter()
        .map(|(option, value)| {
            value
                .as_str()
                .map(|s| (option.clone(), s.to_owned()))
                .ok_or_else(|| SettingsError::InvalidValue {
                    key: key.to_owned(),
                    reason: format!("option {option} is not a string"),
                })
        })
        .collect()
}
