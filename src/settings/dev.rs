//! Development override layer.

use crate::resolver::{Layer, Value};

/// Build the development overrides.
///
/// Debug mode on, a single task-queue worker, and no hostname restrictions.
pub fn overrides() -> Layer {
    Layer::new()
        .set("debug", true)
        .set("task_queue.worker_concurrency", 1_i64)
        .set("allowed_hosts", Value::List(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve, MapEnv};
    use crate::settings::base;
    use pretty_assertions::assert_eq;

    #[test]
    fn debug_flag_flips_to_true() {
        let ns = resolve(&base::layer(), &overrides(), &MapEnv::new());
        assert_eq!(ns.get_bool("debug").unwrap(), true);
    }

    #[test]
    fn worker_concurrency_drops_to_one() {
        let ns = resolve(&base::layer(), &overrides(), &MapEnv::new());
        assert_eq!(ns.get_int("task_queue.worker_concurrency").unwrap(), 1);
    }

    #[test]
    fn base_only_keys_are_untouched() {
        let ns = resolve(&base::layer(), &overrides(), &MapEnv::new());
        assert_eq!(ns.get_str("locale.time_zone").unwrap(), "Asia/Tehran");
        assert_eq!(ns.get_str("session.cache_alias").unwrap(), "default");
    }
}
