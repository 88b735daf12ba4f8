use crate::AppData;
use axum::Router;
use axum::routing::{delete, get, post, put};

pub fn news_routes() -> Router<AppData> {
    Router::new()
        .route("/api/news", get(super::news_list_action))
        .route("/api/news", post(super::news_create_action))
        .route("/api/news/{id}", put(super::news_update_action))
        .route("/api/news/{id}", delete(super::news_delete_action))
}
