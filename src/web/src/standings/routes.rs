use crate::AppData;
use axum::Router;
use axum::routing::get;

pub fn standings_routes() -> Router<AppData> {
    Router::new()
        .route("/api/standings", get(super::standings_action))
        .route("/api/standings/{group}", get(super::group_standings_action))
}
