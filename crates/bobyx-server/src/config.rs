use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// Config file read from the working directory unless `BOBYX_CONFIG` names
/// another path.
pub const DEFAULT_CONFIG_PATH: &str = "bobyx.toml";

/// Top-level server configuration, loaded from `bobyx.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Directory holding the static client bundle.
    pub web_root: String,
    /// Entry document served for unmatched paths, relative to `web_root`.
    pub index_path: String,
    pub store: StoreConfig,
    pub limits: LimitsConfig,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            web_root: "public".to_string(),
            index_path: "client/index.html".to_string(),
            store: StoreConfig::default(),
            limits: LimitsConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    /// Process-local store. Data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Key-value backend selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub redis_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redis,
            redis_url: "redis://localhost:6379".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allow any origin, method and header.
    pub permissive: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { permissive: true }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("listen_addr {0:?} is not a valid socket address")]
    InvalidListenAddr(String),
    #[error("limits.max_body_bytes must be > 0")]
    ZeroBodyLimit,
    #[error("store.redis_url {0:?} must use the redis:// or rediss:// scheme")]
    InvalidRedisUrl(String),
    #[error("unknown store backend {0:?} (expected \"redis\" or \"memory\")")]
    UnknownBackend(String),
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        if self.store.backend == StoreBackend::Redis
            && !(self.store.redis_url.starts_with("redis://")
                || self.store.redis_url.starts_with("rediss://"))
        {
            return Err(ConfigError::InvalidRedisUrl(self.store.redis_url.clone()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(self.listen_addr.clone()))
    }

    /// Full path of the client entry document.
    pub fn index_file(&self) -> PathBuf {
        PathBuf::from(&self.web_root).join(&self.index_path)
    }

    /// Load config from the config file if it exists, then apply environment
    /// variable overrides.
    pub fn load() -> Self {
        let path =
            std::env::var("BOBYX_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                ServerConfig::default()
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from an environment lookup. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(addr) = var("BOBYX_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Some(port) = var("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.set_port(port),
                Err(_) => tracing::warn!(port = %port, "Ignoring PORT that is not a valid port number"),
            }
        }
        if let Some(root) = var("BOBYX_WEB_ROOT") {
            self.web_root = root;
        }
        if let Some(url) = var("REDIS_URL") {
            self.store.redis_url = url;
        }
        if let Some(backend) = var("BOBYX_STORE") {
            match backend.parse() {
                Ok(backend) => self.store.backend = backend,
                Err(e) => tracing::warn!("Ignoring BOBYX_STORE: {e}"),
            }
        }
        if let Some(val) = var("BOBYX_MAX_BODY_BYTES")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.max_body_bytes = n;
        }
    }

    fn set_port(&mut self, port: u16) {
        match self.listen_addr.parse::<SocketAddr>() {
            Ok(mut addr) => {
                addr.set_port(port);
                self.listen_addr = addr.to_string();
            },
            Err(_) => self.listen_addr = format!("0.0.0.0:{port}"),
        }
    }
}
