use database::TournamentStore;
use env_logger::Env;
use log::info;
use std::env;
use std::sync::Arc;
use std::time::Instant;
use web::{AppData, EventHub, ServerConfig, TournamentServer};

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() {
    color_eyre::install().unwrap();

    env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();

    let config = ServerConfig::from_env();

    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| String::from("data"));

    let now = Instant::now();
    let store = TournamentStore::load(&data_dir).await;
    info!("store loaded: {} ms", now.elapsed().as_millis());

    let data = AppData {
        store: Arc::new(store),
        hub: EventHub::new(),
        config: Arc::new(config),
    };

    TournamentServer::new(data).run().await;
}
