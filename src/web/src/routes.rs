use crate::AppData;
use crate::auth::routes::auth_routes;
use crate::common::default_handler::default_handler;
use crate::matches::routes::match_routes;
use crate::news::routes::news_routes;
use crate::players::routes::player_routes;
use crate::standings::routes::standings_routes;
use crate::teams::routes::team_routes;
use crate::ws::routes::ws_routes;
use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;

async fn banner() -> &'static str {
    "Open Cup API"
}

pub struct ServerRoutes;

impl ServerRoutes {
    pub fn create() -> Router<AppData> {
        #[cfg(debug_assertions)]
        let static_dir = "src/web/static";

        #[cfg(not(debug_assertions))]
        let static_dir = "static";

        Router::<AppData>::new()
            .route("/", get(banner))
            .merge(auth_routes())
            .merge(team_routes())
            .merge(player_routes())
            .merge(match_routes())
            .merge(news_routes())
            .merge(standings_routes())
            .merge(ws_routes())
            .nest_service("/static", ServeDir::new(static_dir))
            .fallback(default_handler)
    }
}
