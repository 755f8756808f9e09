//! Base layer declarations.
//!
//! Declares every key the deployment consumes, with defaults and
//! environment lookups. Override layers ([`super::dev`], [`super::prod`])
//! re-declare a subset of these.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::resolver::{Layer, Value};

const MINUTE: u64 = 60;
const DAY: u64 = 24 * 60 * 60;

/// Build the base layer.
pub fn layer() -> Layer {
    Layer::new()
        // Core framework keys
        .env("secret_key", "DJANGO_SECRET_KEY")
        .set("debug", false)
        .set("allowed_hosts", Value::List(Vec::new()))
        .set(
            "installed_apps",
            Value::list([
                "django.contrib.admin",
                "django.contrib.auth",
                "django.contrib.contenttypes",
                "django.contrib.sessions",
                "django.contrib.messages",
                "django.contrib.staticfiles",
                "rest_framework",
                "rest_framework_simplejwt",
            ]),
        )
        .set(
            "middleware",
            Value::list([
                "django.middleware.security.SecurityMiddleware",
                "django.contrib.sessions.middleware.SessionMiddleware",
                "django.middleware.common.CommonMiddleware",
                "django.middleware.csrf.CsrfViewMiddleware",
                "django.contrib.auth.middleware.AuthenticationMiddleware",
                "django.contrib.messages.middleware.MessageMiddleware",
                "django.middleware.clickjacking.XFrameOptionsMiddleware",
            ]),
        )
        // Database connection parameters, all environment-derived
        .env("database.engine", "DB_ENGINE")
        .env("database.name", "DB_NAME")
        .env("database.user", "DB_USER")
        .env("database.password", "DB_PASSWORD")
        .env("database.host", "DB_HOST")
        .env("database.port", "DB_PORT")
        // Password validation policy
        .set(
            "auth.password_validators",
            Value::list([
                "django.contrib.auth.password_validation.UserAttributeSimilarityValidator",
                "django.contrib.auth.password_validation.MinimumLengthValidator",
                "django.contrib.auth.password_validation.CommonPasswordValidator",
                "django.contrib.auth.password_validation.NumericPasswordValidator",
            ]),
        )
        // Internationalization
        .set("locale.language_code", "en-us")
        .set("locale.time_zone", "Asia/Tehran")
        .set("locale.use_i18n", true)
        .set("locale.use_tz", true)
        // Static and media file roots
        .set("static.url", "/static/")
        .set("static.dirs", Value::list(["assets"]))
        .set("media.url", "/media/")
        .set("media.root", "uploads")
        // Redis connection parameters
        .env_or("redis.host", "REDIS_HOST", "redis")
        .env_or("redis.port", "REDIS_PORT", "6379")
        .env_or("redis.db_cache", "REDIS_DB_CACHE", "1")
        .env_or("redis.db_channels", "REDIS_DB_CHANNELS", "2")
        // Cache and session backends
        .set("cache.backend", "django_redis.cache.RedisCache")
        .format(
            "cache.location",
            "redis://{redis.host}:{redis.port}/{redis.db_cache}",
        )
        .set("cache.options", cache_options())
        .set("session.engine", "django.contrib.sessions.backends.cache")
        .set("session.cache_alias", "default")
        // Channel layer (pub/sub transport)
        .set("channels.backend", "channels_redis.core.RedisChannelLayer")
        .format_list(
            "channels.hosts",
            ["redis://{redis.host}:{redis.port}/{redis.db_channels}"],
        )
        // Task queue broker and execution policy
        .format("task_queue.broker_url", "redis://{redis.host}:{redis.port}/0")
        .format(
            "task_queue.result_backend",
            "redis://{redis.host}:{redis.port}/1",
        )
        .set("task_queue.timezone", "UTC")
        .set("task_queue.enable_utc", true)
        .set("task_queue.accept_content", Value::list(["json"]))
        .set("task_queue.task_serializer", "json")
        .set("task_queue.result_serializer", "json")
        .set(
            "task_queue.task_time_limit",
            Duration::from_secs(30 * MINUTE),
        )
        .set(
            "task_queue.task_soft_time_limit",
            Duration::from_secs(20 * MINUTE),
        )
        .set("task_queue.default_queue", "default")
        .set("task_queue.worker_concurrency", 24_i64)
        // Token lifetimes
        .set("jwt.access_token_lifetime", Duration::from_secs(DAY))
        .set("jwt.refresh_token_lifetime", Duration::from_secs(7 * DAY))
        // HTTPS toggles, off by default; production re-declares them
        .set("security.ssl_redirect", false)
        .set("security.session_cookie_secure", false)
        .set("security.csrf_cookie_secure", false)
}

fn cache_options() -> Value {
    let mut options = BTreeMap::new();
    options.insert(
        "client_class".to_owned(),
        Value::str("django_redis.client.DefaultClient"),
    );
    Value::Map(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve, MapEnv};
    use pretty_assertions::assert_eq;

    #[test]
    fn redis_host_defaults_when_unset() {
        let ns = resolve(&layer(), &Layer::new(), &MapEnv::new());
        assert_eq!(ns.get_str("redis.host").unwrap(), "redis");
        assert_eq!(ns.get_str("redis.port").unwrap(), "6379");
    }

    #[test]
    fn cache_location_tracks_cache_db_index() {
        let env = MapEnv::new().set("REDIS_DB_CACHE", "5");
        let ns = resolve(&layer(), &Layer::new(), &env);
        assert_eq!(ns.get_str("cache.location").unwrap(), "redis://redis:6379/5");
    }

    #[test]
    fn channel_hosts_use_channels_db_index() {
        let ns = resolve(&layer(), &Layer::new(), &MapEnv::new());
        assert_eq!(
            ns.get_list("channels.hosts").unwrap(),
            vec!["redis://redis:6379/2".to_owned()]
        );
    }

    #[test]
    fn broker_and_result_backend_pin_db_zero_and_one() {
        let env = MapEnv::new().set("REDIS_HOST", "cache.internal");
        let ns = resolve(&layer(), &Layer::new(), &env);
        assert_eq!(
            ns.get_str("task_queue.broker_url").unwrap(),
            "redis://cache.internal:6379/0"
        );
        assert_eq!(
            ns.get_str("task_queue.result_backend").unwrap(),
            "redis://cache.internal:6379/1"
        );
    }

    #[test]
    fn database_parameters_are_empty_when_unset() {
        let ns = resolve(&layer(), &Layer::new(), &MapEnv::new());
        assert_eq!(ns.get_str("database.name").unwrap(), "");
        assert_eq!(ns.get_str("database.host").unwrap(), "");
    }

    #[test]
    fn token_lifetimes() {
        let ns = resolve(&layer(), &Layer::new(), &MapEnv::new());
        assert_eq!(
            ns.get_duration("jwt.access_token_lifetime").unwrap(),
            Duration::from_secs(86_400)
        );
        assert_eq!(
            ns.get_duration("jwt.refresh_token_lifetime").unwrap(),
            Duration::from_secs(7 * 86_400)
        );
    }
}
