//! Settings Error Types
//!
//! Centralized error handling for configuration loading and projection.
//!
//! Resolution itself is total and never produces these errors; they surface
//! only when the `.env` file cannot be parsed or when the typed projection
//! finds a key missing or of the wrong shape.

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    #[error("Type mismatch for key {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid value for key {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),
}
