//! Error types for Heart Health Studio

use thiserror::Error;

/// Result type alias for Heart Health Studio operations
pub type Result<T> = std::result::Result<T, HeartError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum HeartError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Train the model first!")]
    ModelNotTrained,

    #[error("Run a prediction before requesting a report")]
    NoPrediction,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<polars::error::PolarsError> for HeartError {
    fn from(err: polars::error::PolarsError) -> Self {
        HeartError::DataError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for HeartError {
    fn from(err: ndarray::ShapeError) -> Self {
        HeartError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HeartError::DataError("test error".to_string());
        assert_eq!(err.to_string(), "Data error: test error");
        assert_eq!(HeartError::ModelNotTrained.to_string(), "Train the model first!");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HeartError = io_err.into();
        assert!(matches!(err, HeartError::IoError(_)));
    }
}
