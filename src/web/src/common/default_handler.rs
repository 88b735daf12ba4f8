use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

pub async fn default_handler(uri: axum::http::Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        [
            (header::CONTENT_TYPE, "text/plain".to_string()),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        format!("404 Not Found: {}", uri.path()),
    )
        .into_response()
}
