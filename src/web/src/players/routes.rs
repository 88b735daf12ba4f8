use crate::AppData;
use axum::Router;
use axum::routing::{delete, get, post, put};

pub fn player_routes() -> Router<AppData> {
    Router::new()
        .route("/api/players", get(super::player_list_action))
        .route("/api/players", post(super::player_create_action))
        .route("/api/players/{id}", put(super::player_update_action))
        .route("/api/players/{id}", delete(super::player_delete_action))
}
