use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user already exists")]
    Conflict,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("missing bearer token")]
    MissingToken,
    #[error("token expired")]
    TokenExpired,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::Unauthorized => 1004,
            AuthError::MissingToken => 1005,
            AuthError::TokenExpired => 1006,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Whether the caller failed to authenticate (as opposed to a server fault).
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthorized | AuthError::MissingToken | AuthError::TokenExpired | AuthError::TokenError(_)
        )
    }
}
