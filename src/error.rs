use thiserror::Error;

/// Failure taxonomy for everything the agent does against the platform.
///
/// `Unauthorized` is special: the API client handles it globally by tearing
/// the session down, so individual callers only ever see it after the fact.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request never reached the server.
    #[error("network error: {0}")]
    Transport(String),

    /// The backend rejected the bearer token. The session is already cleared
    /// by the time this surfaces.
    #[error("session expired")]
    Unauthorized,

    /// A 4xx other than 401, or a local pre-submit check. The message is
    /// user-visible; no state changed.
    #[error("{0}")]
    Validation(String),

    /// A 5xx. Surfaced generically; retried only if the user re-initiates.
    #[error("server error ({0})")]
    Server(u16),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("channel error: {0}")]
    Channel(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True when the failure is the caller's own input rather than a platform
    /// fault, so presenters can style it accordingly.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}
