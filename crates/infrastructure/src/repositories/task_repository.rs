use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use taskcache_application::ports::TaskRepository;
use taskcache_domain::{DomainError, Task, TaskList};
use tracing::{debug, error, instrument};

type TaskRow = (i64, String, String, Option<String>);

// Fixed width so that text ordering matches time ordering, and nanoseconds
// survive the round trip.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9fZ";

pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn format_timestamp(value: DateTime<Utc>) -> String {
        value.format(TIMESTAMP_FORMAT).to_string()
    }

    fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DomainError> {
        DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| DomainError::Database(format!("invalid timestamp '{}': {}", value, e)))
    }

    fn row_to_task(row: TaskRow) -> Result<Task, DomainError> {
        let (id, title, updated, completed) = row;

        let completed = completed.as_deref().map(Self::parse_timestamp).transpose()?;

        Ok(Task {
            id,
            title,
            updated: Self::parse_timestamp(&updated)?,
            complete: completed.is_some(),
            completed,
        })
    }

    fn not_found(id: i64) -> DomainError {
        DomainError::NotFound(format!("todo {} not found", id))
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    #[instrument(skip(self, task), fields(title = %task.title))]
    async fn create(&self, task: &Task) -> Result<Task, DomainError> {
        let now = Utc::now();
        let completed = task.complete.then_some(now);

        let result = sqlx::query("INSERT INTO todo (title, updated, completed) VALUES (?, ?, ?)")
            .bind(&task.title)
            .bind(Self::format_timestamp(now))
            .bind(completed.map(Self::format_timestamp))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create todo");
                DomainError::Database(e.to_string())
            })?;

        Ok(Task {
            id: result.last_insert_rowid(),
            title: task.title.clone(),
            updated: now,
            completed,
            complete: task.complete,
        })
    }

    #[instrument(skip(self))]
    async fn read(&self, id: i64) -> Result<Task, DomainError> {
        let row = sqlx::query_as::<_, TaskRow>(
            "SELECT id, title, updated, completed FROM todo WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query todo by id");
            DomainError::Database(e.to_string())
        })?;

        row.map(Self::row_to_task)
            .transpose()?
            .ok_or_else(|| Self::not_found(id))
    }

    #[instrument(skip(self, task), fields(id = task.id))]
    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        // The caller only knows the flag, so the transition is detected
        // against the stored row.
        let original = self
            .read(task.id)
            .await
            .map_err(|e| e.context("update: could not read db"))?;

        let now = Utc::now();
        let completed = match (original.complete, task.complete) {
            (false, true) => Some(now),
            (true, false) => None,
            _ => original.completed,
        };

        let result = sqlx::query("UPDATE todo SET title = ?, updated = ?, completed = ? WHERE id = ?")
            .bind(&task.title)
            .bind(Self::format_timestamp(now))
            .bind(completed.map(Self::format_timestamp))
            .bind(task.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to update todo");
                DomainError::Database(format!("update: could not exec db: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(task.id));
        }

        Ok(Task {
            id: task.id,
            title: task.title.clone(),
            updated: now,
            complete: completed.is_some(),
            completed,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete todo");
                DomainError::Database(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            debug!(id, "Delete of absent todo");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<TaskList, DomainError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            "SELECT id, title, updated, completed FROM todo ORDER BY updated DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query todo list");
            DomainError::Database(e.to_string())
        })?;

        rows.into_iter().map(Self::row_to_task).collect()
    }
}
