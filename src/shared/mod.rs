//! Shared Utilities
//!
//! Common types used across the resolver and the settings surface.

pub mod error;
