//! Production override layer.

use std::time::Duration;

use crate::resolver::{Layer, Value};

/// Build the production overrides.
///
/// Hostnames come from `DJANGO_ALLOWED_HOSTS`, static files get a collection
/// root, the task-queue broker is pinned to the in-cluster Redis service,
/// and the HTTPS toggles are declared explicitly.
pub fn overrides() -> Layer {
    Layer::new()
        .env_list("allowed_hosts", "DJANGO_ALLOWED_HOSTS", ',')
        .set("static.root", "staticfiles")
        // Broker and backend pinned to the compose service name
        .set("task_queue.broker_url", "redis://redis:6379/0")
        .set("task_queue.result_backend", "redis://redis:6379/1")
        .set("task_queue.timezone", "UTC")
        .set("task_queue.enable_utc", true)
        // json only; pickle stays disabled
        .set("task_queue.accept_content", Value::list(["json"]))
        .set("task_queue.task_serializer", "json")
        .set("task_queue.result_serializer", "json")
        .set("task_queue.task_time_limit", Duration::from_secs(30 * 60))
        .set(
            "task_queue.task_soft_time_limit",
            Duration::from_secs(20 * 60),
        )
        .set("task_queue.default_queue", "default")
        // HTTPS toggles, kept off until TLS terminates at the app
        .set("security.ssl_redirect", false)
        .set("security.session_cookie_secure", false)
        .set("security.csrf_cookie_secure", false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve, MapEnv};
    use crate::settings::base;
    use pretty_assertions::assert_eq;

    #[test]
    fn allowed_hosts_split_from_environment() {
        let env = MapEnv::new().set("DJANGO_ALLOWED_HOSTS", "api.example.com,www.example.com");
        let ns = resolve(&base::layer(), &overrides(), &env);
        assert_eq!(
            ns.get_list("allowed_hosts").unwrap(),
            vec!["api.example.com".to_owned(), "www.example.com".to_owned()]
        );
    }

    #[test]
    fn allowed_hosts_empty_when_unset() {
        let ns = resolve(&base::layer(), &overrides(), &MapEnv::new());
        assert_eq!(ns.get_list("allowed_hosts").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn static_root_is_added() {
        let ns = resolve(&base::layer(), &overrides(), &MapEnv::new());
        assert_eq!(ns.get_str("static.root").unwrap(), "staticfiles");
    }

    #[test]
    fn broker_url_is_pinned_regardless_of_redis_env() {
        let env = MapEnv::new().set("REDIS_HOST", "cache.internal");
        let ns = resolve(&base::layer(), &overrides(), &env);
        assert_eq!(
            ns.get_str("task_queue.broker_url").unwrap(),
            "redis://redis:6379/0"
        );
    }

    #[test]
    fn worker_concurrency_keeps_base_value() {
        let ns = resolve(&base::layer(), &overrides(), &MapEnv::new());
        assert_eq!(ns.get_int("task_queue.worker_concurrency").unwrap(), 24);
    }
}
