use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body returned for every failed request.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Failed to fetch page content: {0}")]
    Fetch(String),

    #[error("Could not extract content from the URL")]
    Extract,

    #[error("Summarization failed: {0}")]
    Summarize(String),

    #[error("GEMINI_API_KEY is not set. Configure it in the server environment.")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::MissingUrl => (StatusCode::BAD_REQUEST, "URL is required".to_string(), None),
            // The cause stays in the server-side log; `details` is reserved
            // for unexpected 500s.
            AppError::Fetch(_) => (
                StatusCode::BAD_REQUEST,
                "Could not fetch the page content".to_string(),
                None,
            ),
            AppError::Extract => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not extract content from the URL".to_string(),
                None,
            ),
            AppError::Summarize(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate a summary".to_string(),
                Some(msg),
            ),
            AppError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GEMINI_API_KEY is not set. Configure it in the server environment.".to_string(),
                None,
            ),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
