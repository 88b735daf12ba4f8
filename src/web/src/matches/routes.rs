use crate::AppData;
use axum::Router;
use axum::routing::{delete, get, post, put};

pub fn match_routes() -> Router<AppData> {
    Router::new()
        .route("/api/matches", get(super::match_list_action))
        .route("/api/matches", post(super::match_create_action))
        .route("/api/matches/{id}", put(super::match_update_action))
        .route("/api/matches/{id}", delete(super::match_delete_action))
}
