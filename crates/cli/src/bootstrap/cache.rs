use taskcache_domain::config::CacheConfig;
use taskcache_infrastructure::cache::RedisCacheStore;
use tracing::{info, warn};

pub fn init_cache(cfg: &CacheConfig) -> anyhow::Result<RedisCacheStore> {
    if !cfg.enabled {
        warn!("Cache disabled: every read goes to the database");
    }

    let cache = RedisCacheStore::new(&cfg.url(), cfg.enabled)?;
    info!(host = %cfg.host, port = cfg.port, "Redis cache configured");

    Ok(cache)
}
