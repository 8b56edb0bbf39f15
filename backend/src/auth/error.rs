//! Error types for identity operations.

use thiserror::Error;

/// Errors raised while issuing or resolving credentials.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// Malformed credentials (missing email, short password, ...).
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<String>,
    },

    /// Sign-up for an email that already has an account.
    #[error("An account with this email already exists")]
    AccountExists,

    /// Unknown email or wrong password. The two are not distinguished.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Token missing, unknown, revoked or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Provider failure unrelated to the caller's input.
    #[error("Identity provider error: {0}")]
    Internal(String),
}

impl IdentityError {
    pub fn validation(message: impl Into<String>, fields: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
        }
    }

    /// Whether the caller is simply not authenticated.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::InvalidToken)
    }
}

pub type IdentityResult<T> = Result<T, IdentityError>;
