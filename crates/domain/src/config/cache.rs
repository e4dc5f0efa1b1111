use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// When false every cache read misses and every cache write is a no-op
    /// (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Redis host (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Redis port (default: 6379)
    #[serde(default = "default_port")]
    pub port: u16,
}

impl CacheConfig {
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6379
}
