use async_trait::async_trait;
use taskcache_domain::{DomainError, Task, TaskList};

/// Repository interface for the durable task store.
///
/// The store is the only authority on whether a task exists and which id
/// it has.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task.
    ///
    /// `updated` is set to now. `completed` is set to now only when
    /// `task.complete` is true.
    ///
    /// # Returns
    ///
    /// * `Ok(Task)` - The stored task with its assigned id
    /// * `Err(DomainError::Database)` - If the insert fails
    async fn create(&self, task: &Task) -> Result<Task, DomainError>;

    /// Retrieves a task by id.
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - If no task has this id
    /// * `DomainError::Database` - If the query fails
    async fn read(&self, id: i64) -> Result<Task, DomainError>;

    /// Updates title and completion state of an existing task.
    ///
    /// Only `id`, `title` and `complete` of the input are used. The current
    /// row is read first: `updated` is always refreshed, `completed` is set
    /// on a false to true transition and cleared on true to false.
    ///
    /// # Returns
    ///
    /// * `Ok(Task)` - The task as persisted
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - If no task has this id
    /// * `DomainError::Database` - If the query fails
    async fn update(&self, task: &Task) -> Result<Task, DomainError>;

    /// Deletes a task. Deleting an absent id succeeds.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;

    /// Retrieves all tasks, most recently updated first.
    async fn list(&self) -> Result<TaskList, DomainError>;
}
