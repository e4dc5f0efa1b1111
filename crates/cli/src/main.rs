//! # Taskcache
//!
//! Todo API that keeps a Redis cache consistent with a SQL store.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use taskcache_api::AppState;
use taskcache_domain::CliOverrides;
use tracing::info;

#[derive(Parser)]
#[command(name = "taskcache")]
#[command(version)]
#[command(about = "Todo API with a write-through Redis cache in front of SQL")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short = 'c', long, env = "TODO_CONFIG")]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'p', long, env = "PORT")]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Redis host
    #[arg(long, env = "REDISHOST")]
    redis_host: Option<String>,

    /// Redis port
    #[arg(long, env = "REDISPORT")]
    redis_port: Option<u16>,

    /// Turn the cache on or off (`--cache-enabled false`)
    #[arg(long, env = "TODO_CACHE_ENABLED")]
    cache_enabled: Option<bool>,

    /// sqlx database URL, e.g. sqlite://./taskcache.db
    #[arg(long, env = "TODO_DATABASE_URL")]
    database_url: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, env = "TODO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Flush the whole cache before serving
    #[arg(long)]
    clear_cache: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.bind.clone(),
            port: self.port,
            cache_host: self.redis_host.clone(),
            cache_port: self.redis_port,
            cache_enabled: self.cache_enabled,
            database_url: self.database_url.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config.logging);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        port = config.server.port,
        bind = %config.server.bind_address,
        cache_enabled = config.cache.enabled,
        "Configuration loaded"
    );

    let pool = bootstrap::init_database(&config.database).await?;
    let cache = bootstrap::init_cache(&config.cache)?;
    let storage = di::build_storage(cache, pool.clone());

    if cli.clear_cache {
        storage.clear_cache().await?;
    }

    server::start_web_server(&config.server, AppState::new(storage)).await?;

    pool.close().await;
    Ok(())
}
