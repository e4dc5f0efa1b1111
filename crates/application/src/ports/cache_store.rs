use async_trait::async_trait;
use taskcache_domain::{DomainError, Task, TaskList};

/// Key-value cache holding serialized tasks.
///
/// Single tasks live under their id, the full list under a fixed sentinel
/// key that no id can produce. Reads return `Ok(None)` on a miss; an `Err`
/// always means the cache itself could not be used.
///
/// A disabled cache misses on every read and accepts every write as a no-op.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Looks up a single task by cache key.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Task))` - Cache hit
    /// * `Ok(None)` - Key absent, or the cache is disabled
    /// * `Err(DomainError::CacheUnavailable)` - Transport failure
    /// * `Err(DomainError::Encoding)` - The stored value is not a task
    async fn get(&self, key: &str) -> Result<Option<Task>, DomainError>;

    /// Stores `task` under [`Task::key`].
    async fn save(&self, task: &Task) -> Result<(), DomainError>;

    /// Removes a single task entry. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    /// Looks up the cached task list.
    async fn get_list(&self) -> Result<Option<TaskList>, DomainError>;

    /// Stores the whole task list, replacing any previous one.
    async fn save_list(&self, tasks: &TaskList) -> Result<(), DomainError>;

    /// Invalidates the cached task list.
    async fn delete_list(&self) -> Result<(), DomainError>;

    /// Empties the whole cache namespace.
    async fn clear(&self) -> Result<(), DomainError>;
}
