use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("speech translation is disabled: service credentials are not configured")]
    Disabled,
    #[error("a translation session is already {0}")]
    AlreadyRunning(String),
    #[error("no translation session is active")]
    NotActive,
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Disabled => AppError::ServiceUnavailable(err.to_string()),
            SessionError::AlreadyRunning(_) | SessionError::NotActive => {
                AppError::Conflict(err.to_string())
            }
            SessionError::Invalid(msg) => AppError::BadRequest(msg),
            SessionError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}
