use crate::AppData;
use axum::Router;
use axum::routing::{delete, get, post, put};

pub fn team_routes() -> Router<AppData> {
    Router::new()
        .route("/api/teams", get(super::team_list_action))
        .route("/api/teams", post(super::team_create_action))
        .route("/api/teams/{id}", put(super::team_update_action))
        .route("/api/teams/{id}", delete(super::team_delete_action))
}
