use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use taskcache_application::ports::CacheStore;
use taskcache_domain::{DomainError, Task, TaskList};
use tracing::{debug, error, info, instrument};

/// Key of the cached task list. Not a decimal number, so no task id can
/// collide with it.
pub const LIST_KEY: &str = "todoslist";

/// Redis-backed [`CacheStore`].
///
/// The connection is opened on first use and multiplexed across calls. It
/// is dropped after a transport error and reopened by the next call. A
/// disabled store never connects.
pub struct RedisCacheStore {
    client: redis::Client,
    connection: ArcSwapOption<MultiplexedConnection>,
    enabled: bool,
}

impl RedisCacheStore {
    pub fn new(url: &str, enabled: bool) -> Result<Self, DomainError> {
        let client = redis::Client::open(url).map_err(|e| {
            error!(error = %e, url, "Invalid Redis URL");
            DomainError::CacheUnavailable(e.to_string())
        })?;

        info!(url, enabled, "Initialized Redis cache");

        Ok(Self {
            client,
            connection: ArcSwapOption::empty(),
            enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn connection(&self) -> Result<MultiplexedConnection, DomainError> {
        if let Some(conn) = self.connection.load_full() {
            return Ok((*conn).clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| self.unavailable(e))?;
        self.connection.store(Some(Arc::new(conn.clone())));

        debug!("Connected to Redis");
        Ok(conn)
    }

    fn unavailable(&self, e: RedisError) -> DomainError {
        if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
        {
            self.connection.store(None);
        }
        error!(error = %e, "Redis command failed");
        DomainError::CacheUnavailable(e.to_string())
    }

    async fn get_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(key).await.map_err(|e| self.unavailable(e))?;

        match raw {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(|e| {
                    error!(error = %e, key, "Cached value is not valid JSON");
                    DomainError::Encoding(format!("cannot decode cached value for {}: {}", key, e))
                })?;
                debug!(key, "Cache hit");
                Ok(Some(value))
            }
            None => {
                debug!(key, "Cache miss");
                Ok(None)
            }
        }
    }

    async fn delete_key(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(key).await.map_err(|e| self.unavailable(e))?;
        debug!(key, "Cleaning from cache");
        Ok(())
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value)
        .map_err(|e| DomainError::Encoding(format!("cannot convert todo to json: {}", e)))
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Task>, DomainError> {
        if !self.enabled {
            return Ok(None);
        }
        self.get_value(key).await
    }

    #[instrument(skip(self, task), fields(id = task.id))]
    async fn save(&self, task: &Task) -> Result<(), DomainError> {
        if !self.enabled {
            return Ok(());
        }

        let json = encode(task)?;
        let mut conn = self.connection().await?;

        // MULTI / SET / EXEC
        let _: () = redis::pipe()
            .atomic()
            .set(task.key(), json)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| self.unavailable(e).context("cannot perform exec operation on cache"))?;

        debug!("Successfully saved todo to cache");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        if !self.enabled {
            return Ok(());
        }
        self.delete_key(key).await
    }

    #[instrument(skip(self))]
    async fn get_list(&self) -> Result<Option<TaskList>, DomainError> {
        if !self.enabled {
            return Ok(None);
        }
        self.get_value(LIST_KEY).await
    }

    #[instrument(skip(self, tasks), fields(count = tasks.len()))]
    async fn save_list(&self, tasks: &TaskList) -> Result<(), DomainError> {
        if !self.enabled {
            return Ok(());
        }

        let json = encode(tasks.as_slice())?;
        let mut conn = self.connection().await?;
        let _: () = conn.set(LIST_KEY, json).await.map_err(|e| self.unavailable(e))?;

        debug!("Successfully saved todo list to cache");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_list(&self) -> Result<(), DomainError> {
        if !self.enabled {
            return Ok(());
        }
        self.delete_key(LIST_KEY).await
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<(), DomainError> {
        if !self.enabled {
            return Ok(());
        }

        let mut conn = self.connection().await?;
        let _: () = redis::cmd("FLUSHALL")
            .query_async(&mut conn)
            .await
            .map_err(|e| self.unavailable(e))?;

        info!("Cache flushed");
        Ok(())
    }
}
