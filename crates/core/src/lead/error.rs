//! Lead error types.

use thiserror::Error;
use veyra_shared::AppError;

/// Lead operation errors.
#[derive(Debug, Error)]
pub enum LeadError {
    /// Lead not found.
    #[error("lead not found: {0}")]
    NotFound(u64),

    /// Validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl LeadError {
    /// Create a not found error.
    #[must_use]
    pub const fn not_found(id: u64) -> Self {
        Self::NotFound(id)
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<LeadError> for AppError {
    fn from(err: LeadError) -> Self {
        match err {
            LeadError::NotFound(id) => Self::NotFound(format!("lead {id}")),
            LeadError::Validation(msg) => Self::Validation(msg),
            LeadError::Repository(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(LeadError::not_found(42).to_string(), "lead not found: 42");
        assert_eq!(
            LeadError::validation("name is required").to_string(),
            "validation error: name is required"
        );
        assert_eq!(
            LeadError::repository("lock poisoned").to_string(),
            "repository error: lock poisoned"
        );
    }

    #[test]
    fn test_app_error_mapping() {
        assert_eq!(AppError::from(LeadError::not_found(7)).status_code(), 404);
        assert_eq!(
            AppError::from(LeadError::validation("email is required")).status_code(),
            400
        );
        assert_eq!(
            AppError::from(LeadError::repository("lock poisoned")).status_code(),
            500
        );
    }
}
