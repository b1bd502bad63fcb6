// File: src/error.rs
// Purpose: Configuration, form and transport error types

use thiserror::Error;

/// Developer mistakes in how a form or its rules are set up
///
/// These are never shown to the user as field messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field '{field}' references format rule '{rule}', which is not registered")]
    UnknownRule { field: String, rule: String },

    #[error("format rule '{name}' has an invalid pattern: {reason}")]
    InvalidPattern { name: String, reason: String },
}

/// Errors raised by [`crate::FormCoordinator`] command handlers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("no field with id '{0}' in this form")]
    UnknownField(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures while talking to the remote submission endpoint
#[derive(Debug, Error)]
pub enum TransportError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("network error: {0}")]
    Network(String),
}
