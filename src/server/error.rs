//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::HeartError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<HeartError> for ServerError {
    fn from(err: HeartError) -> Self {
        match err {
            HeartError::ModelNotTrained | HeartError::NoPrediction => {
                ServerError::Conflict(err.to_string())
            }
            HeartError::InvalidInput(msg) => ServerError::BadRequest(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ServerError::Internal(msg) => {
                tracing::error!(detail = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred".to_string())
            }
        };

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_error_mapping() {
        assert!(matches!(
            ServerError::from(HeartError::ModelNotTrained),
            ServerError::Conflict(_)
        ));
        assert!(matches!(
            ServerError::from(HeartError::InvalidInput("x".into())),
            ServerError::BadRequest(_)
        ));
        assert!(matches!(
            ServerError::from(HeartError::DataError("x".into())),
            ServerError::Internal(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        let resp = ServerError::Conflict("Train the model first!".into()).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let resp = ServerError::Internal("boom".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
