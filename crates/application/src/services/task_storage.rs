use std::sync::Arc;
use taskcache_domain::{DomainError, Task, TaskList};
use tracing::{debug, info, instrument};

use crate::ports::{CacheStore, TaskRepository};

/// Combined cache and database access for tasks.
///
/// Reads are cache-aside: the cache is consulted first and repopulated from
/// the repository on a miss. A cache that fails (as opposed to missing) is
/// never bypassed; its error is returned to the caller.
///
/// Writes invalidate the cached list before touching the repository, then
/// write the resulting task through to the cache. The first failing step
/// aborts the operation and nothing already done is rolled back; the next
/// miss on the read path reconciles the cache with the repository.
///
/// There is no locking between concurrent calls for the same id.
pub struct TaskStorage {
    cache: Arc<dyn CacheStore>,
    store: Arc<dyn TaskRepository>,
}

impl TaskStorage {
    pub fn new(cache: Arc<dyn CacheStore>, store: Arc<dyn TaskRepository>) -> Self {
        Self { cache, store }
    }

    /// Returns all tasks, most recently updated first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<TaskList, DomainError> {
        if let Some(tasks) = self
            .cache
            .get_list()
            .await
            .map_err(|e| e.context("error getting list of todos from cache"))?
        {
            debug!(count = tasks.len(), "Todo list served from cache");
            return Ok(tasks);
        }

        let tasks = self
            .store
            .list()
            .await
            .map_err(|e| e.context("error getting list of todos from database"))?;

        self.cache
            .save_list(&tasks)
            .await
            .map_err(|e| e.context("error caching list of todos"))?;

        debug!(count = tasks.len(), "Todo list loaded from database");
        Ok(tasks)
    }

    /// Returns a single task.
    #[instrument(skip(self))]
    pub async fn read(&self, id: i64) -> Result<Task, DomainError> {
        if let Some(task) = self
            .cache
            .get(&Task::key_for(id))
            .await
            .map_err(|e| e.context("error getting single todo from cache"))?
        {
            debug!(id, "Todo served from cache");
            return Ok(task);
        }

        let task = self
            .store
            .read(id)
            .await
            .map_err(|e| e.context("error getting single todo from database"))?;

        self.cache
            .save(&task)
            .await
            .map_err(|e| e.context("error caching single todo"))?;

        debug!(id, "Todo loaded from database");
        Ok(task)
    }

    /// Records a new task and returns it with its assigned id.
    #[instrument(skip(self, task), fields(title = %task.title))]
    pub async fn create(&self, task: Task) -> Result<Task, DomainError> {
        self.invalidate_list().await?;

        let created = self
            .store
            .create(&task)
            .await
            .map_err(|e| e.context("error creating todo in database"))?;

        self.cache
            .save(&created)
            .await
            .map_err(|e| e.context("error caching created todo"))?;

        info!(id = created.id, "Todo created");
        Ok(created)
    }

    /// Changes title and completion state of a task and returns it as
    /// persisted.
    #[instrument(skip(self, task), fields(id = task.id))]
    pub async fn update(&self, task: Task) -> Result<Task, DomainError> {
        self.invalidate_list().await?;

        let updated = self
            .store
            .update(&task)
            .await
            .map_err(|e| e.context("error updating todo in database"))?;

        self.cache
            .save(&updated)
            .await
            .map_err(|e| e.context("error caching updated todo"))?;

        info!(id = updated.id, complete = updated.complete, "Todo updated");
        Ok(updated)
    }

    /// Removes a task. Removing an absent task succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.invalidate_list().await?;

        self.store
            .delete(id)
            .await
            .map_err(|e| e.context("error deleting todo from database"))?;

        self.cache
            .delete(&Task::key_for(id))
            .await
            .map_err(|e| e.context("error removing todo from cache"))?;

        info!(id, "Todo deleted");
        Ok(())
    }

    /// Drops every cached entry. Maintenance only.
    #[instrument(skip(self))]
    pub async fn clear_cache(&self) -> Result<(), DomainError> {
        self.cache
            .clear()
            .await
            .map_err(|e| e.context("error clearing cache"))?;

        info!("Cache cleared");
        Ok(())
    }

    // Must run before any repository mutation.
    async fn invalidate_list(&self) -> Result<(), DomainError> {
        self.cache
            .delete_list()
            .await
            .map_err(|e| e.context("error clearing cache"))
    }
}
