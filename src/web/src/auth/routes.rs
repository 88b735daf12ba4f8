use crate::AppData;
use axum::Router;
use axum::routing::post;

pub fn auth_routes() -> Router<AppData> {
    Router::new().route("/api/login", post(super::login_action))
}
