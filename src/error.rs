//! Application-wide error types.

pub use crate::api::ApiError;
pub use crate::config::ConfigError;
pub use crate::utils::duration::DurationError;

/// Top-level error type rolled up from every area of the crate.
///
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("terminal error: {0}")]
    Terminal(String),
}

/// Convenience alias used by the command layer.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_render_bare() {
        let error = AppError::Validation("task name is empty".to_string());
        assert_eq!(error.to_string(), "task name is empty");
    }

    #[test]
    fn io_errors_are_wrapped() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: AppError = io.into();
        assert!(error.to_string().contains("I/O error"));
    }
}
