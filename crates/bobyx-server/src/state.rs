use std::sync::Arc;

use bobyx_core::store::GameStore;

use crate::config::ServerConfig;

pub type SharedGameStore = Arc<dyn GameStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedGameStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: SharedGameStore) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
