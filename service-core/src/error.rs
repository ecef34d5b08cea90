use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    /// Whether the error was caused by the caller's input rather than the process.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::BadRequest(_) | AppError::NotFound(_) | AppError::SerializationError(_)
        )
    }

    /// Process exit code for command-line entry points.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ConfigError(_) => 78,
            AppError::BadRequest(_) | AppError::SerializationError(_) => 65,
            AppError::NotFound(_) => 66,
            AppError::InternalError(_) => 70,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(anyhow::Error::new(err)),
            _ => AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}
