use crate::AppData;
use axum::Router;
use axum::routing::get;

pub fn ws_routes() -> Router<AppData> {
    Router::new().route("/ws", get(super::ws_action))
}
