use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const MISSING_QUESTION: &str = "Missing 'question' in request body";
pub const INVALID_QUESTION: &str = "'question' must be a string";

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing 'question' in request body")]
    MissingQuestion,

    #[error("'question' must be a string")]
    InvalidQuestion,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingQuestion => (StatusCode::BAD_REQUEST, MISSING_QUESTION.to_string()),
            ApiError::InvalidQuestion => (StatusCode::BAD_REQUEST, INVALID_QUESTION.to_string()),
            ApiError::Internal(err) => {
                // Debug output carries the context chain and the backtrace; `rag_server`
                // turns capture on at startup.
                tracing::error!(error = ?err, "An internal error occurred while answering");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An internal server error occurred: {err:#}"),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
