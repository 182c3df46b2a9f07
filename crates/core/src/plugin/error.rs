//! Plugin dispatch error types.

use thiserror::Error;
use veyra_shared::AppError;

use super::capability::Capability;

/// Errors raised by individual adapters.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The provider does not implement this operation.
    #[error("operation '{operation}' is not implemented by provider '{provider}'")]
    NotImplemented {
        /// Provider name.
        provider: &'static str,
        /// Operation name.
        operation: &'static str,
    },

    /// The adapter could not be constructed from its settings.
    #[error("adapter configuration error: {0}")]
    Configuration(String),

    /// The requested object does not exist.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The caller passed invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Storage(String),
}

impl AdapterError {
    /// Create a not implemented error.
    #[must_use]
    pub const fn not_implemented(provider: &'static str, operation: &'static str) -> Self {
        Self::NotImplemented {
            provider,
            operation,
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<opendal::Error> for AdapterError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::Storage(err.to_string()),
        }
    }
}

/// Errors raised by the plugin dispatcher.
#[derive(Debug, Error)]
pub enum PluginError {
    /// No adapter is active for the capability.
    #[error("no adapter is active for capability '{capability}'")]
    PluginNotFound {
        /// The capability that was requested.
        capability: Capability,
    },

    /// The active adapter (and any fallback) failed to execute the operation.
    ///
    /// Carries the error from the primary adapter, never the fallback's.
    #[error("capability '{capability}' dispatch failed: {source}")]
    Execution {
        /// The capability that was dispatched.
        capability: Capability,
        /// The primary adapter's error.
        #[source]
        source: AdapterError,
    },
}

impl PluginError {
    /// Create a plugin not found error.
    #[must_use]
    pub const fn not_found(capability: Capability) -> Self {
        Self::PluginNotFound { capability }
    }

    /// Create an execution error wrapping the primary adapter's failure.
    #[must_use]
    pub const fn execution(capability: Capability, source: AdapterError) -> Self {
        Self::Execution { capability, source }
    }
}

impl From<PluginError> for AppError {
    fn from(err: PluginError) -> Self {
        match err {
            PluginError::PluginNotFound { capability } => {
                Self::ServiceUnavailable(format!("no '{capability}' provider is configured"))
            }
            PluginError::Execution { source, .. } => match source {
                AdapterError::NotImplemented { .. } => Self::NotImplemented(source.to_string()),
                AdapterError::NotFound(key) => Self::NotFound(key),
                AdapterError::InvalidInput(msg) => Self::Validation(msg),
                AdapterError::Configuration(_) | AdapterError::Storage(_) => {
                    Self::ExternalService(source.to_string())
                }
            },
        }
    }
}
