use sqlx::SqlitePool;
use std::sync::Arc;
use taskcache_application::TaskStorage;
use taskcache_infrastructure::{cache::RedisCacheStore, repositories::SqliteTaskRepository};

/// Wires the production adapters into the storage coordinator.
pub fn build_storage(cache: RedisCacheStore, pool: SqlitePool) -> Arc<TaskStorage> {
    Arc::new(TaskStorage::new(
        Arc::new(cache),
        Arc::new(SqliteTaskRepository::new(pool)),
    ))
}
