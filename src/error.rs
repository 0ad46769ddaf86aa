use thiserror::Error;

/// Custom error types for flyfish
#[derive(Debug, Error)]
pub enum FlyfishError {
    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: String, message: String },

    #[error("Failed to start background worker: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<crate::config::ConfigError> for FlyfishError {
    fn from(err: crate::config::ConfigError) -> Self {
        match err {
            crate::config::ConfigError::Read { path, source } => FlyfishError::InvalidConfig {
                path,
                message: source.to_string(),
            },
            crate::config::ConfigError::Parse { path, message } => {
                FlyfishError::InvalidConfig { path, message }
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
