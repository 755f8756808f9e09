//! # Layered Settings Resolver
//!
//! Produces one flat [`Namespace`] by evaluating a base [`Layer`] of
//! declarations and then exactly one override layer, last-write-wins.
//! Environment lookups go through an [`EnvSource`], so resolution is a pure
//! function of the declarations and the environment handed to it.
//!
//! ## Usage
//!
//! ```rust
//! use layered_settings::resolver::{resolve, Layer, MapEnv};
//!
//! let base = Layer::new()
//!     .set("debug", false)
//!     .env_or("redis.host", "REDIS_HOST", "redis");
//! let overrides = Layer::new().set("debug", true);
//!
//! let ns = resolve(&base, &overrides, &MapEnv::new());
//! assert_eq!(ns.get_bool("debug").unwrap(), true);
//! assert_eq!(ns.get_str("redis.host").unwrap(), "redis");
//! ```

mod env;
mod layer;
mod namespace;
mod value;

pub use env::{dotenv_overlay, EnvChain, EnvSource, MapEnv, ProcessEnv};
pub use layer::{Declaration, Layer, Source};
pub use namespace::Namespace;
pub use value::{duration_secs, Value};

/// Resolve a base layer plus one override layer into a flat namespace.
///
/// Declarations evaluate in order; the override layer overwrites any key the
/// base already declared and adds any it did not. The operation is total:
/// absent environment variables fall back to their declared defaults (or an
/// empty value), and template interpolation never fails. Validation is
/// deliberately left to the consuming side.
pub fn resolve(base: &Layer, overrides: &Layer, env: &dyn EnvSource) -> Namespace {
    let mut namespace = Namespace::new();

    for declaration in base.iter().chain(overrides.iter()) {
        let value = declaration.source.evaluate(&namespace, env);
        tracing::trace!(key = %declaration.key, kind = value.kind(), "Resolved declaration");
        namespace.insert(declaration.key.clone(), value);
    }

    tracing::debug!(
        base = base.len(),
        overrides = overrides.len(),
        keys = namespace.len(),
        "Namespace resolved"
    );
    namespace
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> Layer {
        Layer::new()
            .set("debug", false)
            .env("secret_key", "APP_SECRET")
            .env_or("redis.host", "REDIS_HOST", "redis")
            .env_or("redis.port", "REDIS_PORT", "6379")
            .format("cache.location", "redis://{redis.host}:{redis.port}/1")
    }

    #[test]
    fn override_wins_over_base() {
        let overrides = Layer::new().set("debug", true);
        let ns = resolve(&base(), &overrides, &MapEnv::new());
        assert_eq!(ns.get_bool("debug").unwrap(), true);
    }

    #[test]
    fn base_only_keys_keep_base_values() {
        let ns = resolve(&base(), &Layer::new(), &MapEnv::new());
        assert_eq!(ns.get_bool("debug").unwrap(), false);
        assert_eq!(ns.get_str("redis.host").unwrap(), "redis");
    }

    #[test]
    fn override_can_add_new_keys() {
        let overrides = Layer::new().set("static.root", "staticfiles");
        let ns = resolve(&base(), &overrides, &MapEnv::new());
        assert_eq!(ns.get_str("static.root").unwrap(), "staticfiles");
        assert_eq!(ns.len(), base().len() + 1);
    }

    #[test]
    fn environment_beats_declared_default() {
        let env = MapEnv::new().set("REDIS_HOST", "cache.internal");
        let ns = resolve(&base(), &Layer::new(), &env);
        assert_eq!(ns.get_str("redis.host").unwrap(), "cache.internal");
        assert_eq!(
            ns.get_str("cache.location").unwrap(),
            "redis://cache.internal:6379/1"
        );
    }

    #[test]
    fn unset_variable_without_default_is_empty() {
        let ns = resolve(&base(), &Layer::new(), &MapEnv::new());
        assert_eq!(ns.get_str("secret_key").unwrap(), "");
    }

    #[test]
    fn templates_see_override_values_declared_earlier() {
        // An override re-declaring both the input key and the template gets
        // the overridden input interpolated.
        let overrides = Layer::new()
            .set("redis.host", "prod-redis")
            .format("cache.location", "redis://{redis.host}:{redis.port}/1");
        let ns = resolve(&base(), &overrides, &MapEnv::new());
        assert_eq!(
            ns.get_str("cache.location").unwrap(),
            "redis://prod-redis:6379/1"
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let env = MapEnv::new()
            .set("APP_SECRET", "s3cret")
            .set("REDIS_PORT", "6380");
        let overrides = Layer::new().set("debug", true);

        let first = resolve(&base(), &overrides, &env);
        let second = resolve(&base(), &overrides, &env);
        assert_eq!(first, second);
    }
}
