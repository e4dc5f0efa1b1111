use serde::{Deserialize, Serialize};

/// Task store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL (default: "sqlite://./taskcache.db")
    #[serde(default = "default_db_url")]
    pub url: String,

    /// Upper bound of pooled connections (default: 10)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_url() -> String {
    "sqlite://./taskcache.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}
