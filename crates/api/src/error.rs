use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use generate::GenerationError;
use serde_json::json;
use thiserror::Error;

/// Errors a handler can surface. Rendered as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
