use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch page: {0}")]
    Fetch(String),

    #[error("Invalid response from completion API")]
    UpstreamShape { details: Value },

    #[error("Error connecting to completion API: {0}")]
    UpstreamNetwork(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("Failed to reach speaker device: {0}")]
    Notify(String),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            // Scrape failures are contained at the task boundary and
            // normally never reach a handler
            AppError::Fetch(msg) => (StatusCode::BAD_GATEWAY, msg, None),
            AppError::UpstreamShape { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid response from completion API".to_string(),
                Some(details),
            ),
            AppError::UpstreamNetwork(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error connecting to completion API".to_string(),
                None,
            ),
            AppError::Speech(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            AppError::Notify(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
