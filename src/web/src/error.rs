use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use database::StoreError;
use serde_json::json;

/// Custom error type for API handlers
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TeamNotFound(_)
            | StoreError::PlayerNotFound(_)
            | StoreError::MatchNotFound(_)
            | StoreError::NewsNotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::MatchLocked(_) => ApiError::Conflict(err.to_string()),
            StoreError::Io(_) | StoreError::Json(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InternalError(format!("JSON error: {}", err))
    }
}

/// Helper type for handler results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let locked: ApiError = StoreError::MatchLocked(3).into();
        assert!(matches!(locked, ApiError::Conflict(_)));

        let missing: ApiError = StoreError::MatchNotFound(9).into();
        assert!(matches!(missing, ApiError::NotFound(_)));
    }
}
