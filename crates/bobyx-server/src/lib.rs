pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod redis_store;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use bobyx_core::memory::MemoryStore;
use bobyx_core::store::StoreResult;

use config::{ServerConfig, StoreBackend};
use redis_store::RedisStore;
use state::{AppState, SharedGameStore};

/// Build the Axum router from a config and an already-connected store.
pub fn build_app(config: ServerConfig, store: SharedGameStore) -> Router<()> {
    let static_files = ServeDir::new(&config.web_root).fallback(ServeFile::new(config.index_file()));
    let max_body_bytes = config.limits.max_body_bytes;
    let permissive_cors = config.cors.permissive;
    let state = AppState::new(config, store);

    let api_routes = Router::new()
        .route("/games", get(api::list_games).post(api::create_game))
        .route("/games/{id}/scene", get(api::get_game_scene));

    let app = Router::new()
        .route("/healthz", get(health::health_check))
        .nest("/api", api_routes)
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if permissive_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Open the configured store backend.
pub async fn connect_store(config: &ServerConfig) -> StoreResult<SharedGameStore> {
    match config.store.backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&config.store.redis_url).await?;
            tracing::info!(url = %config.store.redis_url, "Connected to Redis");
            Ok(Arc::new(store))
        },
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; games are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        },
    }
}
