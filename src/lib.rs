//! # Layered Settings
//!
//! Layered, environment-driven configuration resolution for a web
//! application deployment:
//! - A base layer declaring every configuration key, with defaults and
//!   environment-variable lookups
//! - One override layer per environment (development, production), applied
//!   last-write-wins
//! - `.env` file seeding underneath the process environment
//! - A typed projection of the resolved namespace (database, cache, session,
//!   channel layer, task queue, token lifetimes, security toggles)
//!
//! The resolver is total: an unset variable falls back to its declared
//! default or an empty value, never an error. Validation happens only in the
//! typed projection, at the point of use.
//!
//! ## Module Structure
//!
//! ```text
//! layered_settings/
//! +-- resolver/   Layers, declaration sources, namespace, env sources
//! +-- settings/   Base and override layers, typed projection
//! +-- shared/     Error types
//! +-- telemetry/  Logging setup
//! ```

// Layered resolution core
pub mod resolver;

// Configuration surface and typed projection
pub mod settings;

// Shared utilities
pub mod shared;

// Telemetry and observability
pub mod telemetry;

pub use settings::{Environment, Settings};
pub use shared::error::SettingsError;
