use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("session storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// HTTP status of the failure, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
