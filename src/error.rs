use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

/// User-facing message for every fetch, extraction, or summarization failure.
pub const GENERIC_PROCESSING_MESSAGE: &str =
    "issues fetching article content from that URL. please ensure it is a valid article";

pub const UNSUPPORTED_PAGE_MESSAGE: &str =
    "unsupported page structure: no article body found at that URL";

#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    ValidationError(String),

    #[error("Failed to fetch article: {0}")]
    FetchError(String),

    #[error("Error extracting article text: {0}")]
    ExtractionError(String),

    #[error("Unsupported page structure: {0}")]
    UnsupportedPage(String),

    #[error("Summarization service error: {0}")]
    SummaryError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Status and message exposed to the client. Causes of processing failures stay in the logs.
    pub fn public_parts(&self) -> (StatusCode, String) {
        match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::FetchError(_) | AppError::ExtractionError(_) | AppError::SummaryError(_) => {
                (StatusCode::BAD_REQUEST, GENERIC_PROCESSING_MESSAGE.to_string())
            }
            AppError::UnsupportedPage(_) => (StatusCode::BAD_REQUEST, UNSUPPORTED_PAGE_MESSAGE.to_string()),
            AppError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server misconfigured".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::ValidationError(msg) => tracing::debug!(reason = %msg, "rejected request"),
            AppError::FetchError(cause) => tracing::error!(kind = "fetch", %cause, "issues fetching article content"),
            AppError::ExtractionError(cause) => tracing::error!(kind = "extract", %cause, "issues fetching article content"),
            AppError::UnsupportedPage(cause) => tracing::warn!(kind = "unsupported_page", %cause, "no article container"),
            AppError::SummaryError(cause) => tracing::error!(kind = "summarize", %cause, "issues fetching article content"),
            AppError::ConfigError(cause) => tracing::error!(kind = "config", %cause, "configuration error at request time"),
        }

        let (status, message) = self.public_parts();
        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
