mod auth;
mod broadcast;
mod common;
mod error;
mod matches;
mod news;
mod players;
mod routes;
mod standings;
mod teams;
mod ws;

pub use broadcast::EventHub;
pub use error::{ApiError, ApiResult};

use crate::routes::ServerRoutes;
use axum::response::IntoResponse;
use database::TournamentStore;
use log::{error, info, warn};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

const DEFAULT_PORT: u16 = 3001;

pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| String::from("dev_secret_key_123"));

        let config = ServerConfig {
            port,
            jwt_secret,
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        };

        match &config.admin_username {
            Some(username) => info!("admin credentials loaded for user: {}", username),
            None => warn!("admin credentials not found in environment, login disabled"),
        }

        config
    }
}

pub struct AppData {
    pub store: Arc<TournamentStore>,
    pub hub: EventHub,
    pub config: Arc<ServerConfig>,
}

impl Clone for AppData {
    fn clone(&self) -> Self {
        AppData {
            store: Arc::clone(&self.store),
            hub: self.hub.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

pub struct TournamentServer {
    data: AppData,
}

impl TournamentServer {
    pub fn new(data: AppData) -> Self {
        TournamentServer { data }
    }

    pub async fn run(&self) {
        let port = self.data.config.port;

        let app = ServerRoutes::create()
            .layer(
                ServiceBuilder::new()
                    // Catch panics in handlers and convert them to 500 errors
                    .layer(CatchPanicLayer::custom(|_err| {
                        (
                            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                            "Internal server error - handler panicked".to_string(),
                        )
                            .into_response()
                    })),
            )
            .with_state(self.data.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind to address {}: {}", addr, e);
                panic!("Cannot start server without binding to port");
            }
        };

        info!("listen at: http://localhost:{}", port);

        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
            error!("Server stopped unexpectedly, but not crashing the process");
        }
    }
}
