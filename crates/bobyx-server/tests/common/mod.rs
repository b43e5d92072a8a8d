use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bobyx_core::memory::MemoryStore;
use bobyx_server::build_app;
use bobyx_server::config::ServerConfig;

pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<MemoryStore>,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server backed by a fresh in-memory store.
    pub async fn new() -> Self {
        Self::from_config(ServerConfig::default()).await
    }

    /// Start a test server serving static files from `web_root`.
    pub async fn with_web_root(web_root: &std::path::Path) -> Self {
        let config = ServerConfig {
            web_root: web_root.to_string_lossy().into_owned(),
            ..ServerConfig::default()
        };
        Self::from_config(config).await
    }

    pub async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let store = Arc::new(MemoryStore::new());
        let app = build_app(config, Arc::clone(&store) as _);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            store,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn games_url(&self) -> String {
        format!("{}/api/games", self.base_url())
    }

    pub fn scene_url(&self, id: &str) -> String {
        format!("{}/api/games/{id}/scene", self.base_url())
    }
}

/// POST a create request and return `(status, body)`.
pub async fn create_game(
    client: &reqwest::Client,
    server: &TestServer,
    body: serde_json::Value,
) -> (u16, serde_json::Value) {
    let resp = client
        .post(server.games_url())
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

/// GET the listing and return the `games` array.
pub async fn list_games(client: &reqwest::Client, server: &TestServer) -> Vec<serde_json::Value> {
    let resp = client.get(server.games_url()).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    body["games"].as_array().unwrap().clone()
}
