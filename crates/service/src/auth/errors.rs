use thiserror::Error;

/// Failures from login and token verification.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credentials rejected")]
    Unauthorized,
    #[error("password hashing failed: {0}")]
    HashError(String),
    #[error("jwt error: {0}")]
    TokenError(String),
    #[error("account lookup failed: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable code attached to auth warn logs.
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Unauthorized => 1001,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}
