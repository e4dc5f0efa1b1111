#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use taskcache_application::ports::{CacheStore, TaskRepository};
use taskcache_domain::{DomainError, Task, TaskList};
use tokio::sync::RwLock;

/// Ordered record of backend calls, shared by both mocks so tests can
/// assert the protocol sequence.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn touched_store(&self) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c.starts_with("store."))
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

// ============================================================================
// Mock CacheStore
// ============================================================================

const LIST_KEY: &str = "todoslist";

/// In-memory cache that keeps values JSON-encoded, like the real one.
#[derive(Clone)]
pub struct MockCacheStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    enabled: bool,
    should_fail: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    log: CallLog,
}

impl MockCacheStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            enabled: true,
            should_fail: Arc::new(AtomicBool::new(false)),
            fail_writes: Arc::new(AtomicBool::new(false)),
            log,
        }
    }

    pub fn disabled(log: CallLog) -> Self {
        Self {
            enabled: false,
            ..Self::new(log)
        }
    }

    /// Every call fails as if the connection were closed.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Only `save` and `save_list` fail.
    pub fn set_fail_writes(&self, fail_writes: bool) {
        self.fail_writes.store(fail_writes, Ordering::SeqCst);
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn has_list(&self) -> bool {
        self.contains(LIST_KEY).await
    }

    fn enter(&self, call: &str) -> Result<(), DomainError> {
        self.log.push(call);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::CacheUnavailable(
                "use of closed network connection".to_string(),
            ));
        }
        Ok(())
    }

    fn enter_write(&self, call: &str) -> Result<(), DomainError> {
        self.enter(call)?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::CacheUnavailable("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Task>, DomainError> {
        self.enter("cache.get")?;
        if !self.enabled {
            return Ok(None);
        }
        match self.entries.read().await.get(key) {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| DomainError::Encoding(e.to_string())),
            None => Ok(None),
        }
    }

    async fn save(&self, task: &Task) -> Result<(), DomainError> {
        self.enter_write("cache.save")?;
        if !self.enabled {
            return Ok(());
        }
        let raw = serde_json::to_string(task).map_err(|e| DomainError::Encoding(e.to_string()))?;
        self.entries.write().await.insert(task.key(), raw);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.enter("cache.delete")?;
        if !self.enabled {
            return Ok(());
        }
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn get_list(&self) -> Result<Option<TaskList>, DomainError> {
        self.enter("cache.get_list")?;
        if !self.enabled {
            return Ok(None);
        }
        match self.entries.read().await.get(LIST_KEY) {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| DomainError::Encoding(e.to_string())),
            None => Ok(None),
        }
    }

    async fn save_list(&self, tasks: &TaskList) -> Result<(), DomainError> {
        self.enter_write("cache.save_list")?;
        if !self.enabled {
            return Ok(());
        }
        let raw = serde_json::to_string(tasks).map_err(|e| DomainError::Encoding(e.to_string()))?;
        self.entries.write().await.insert(LIST_KEY.to_string(), raw);
        Ok(())
    }

    async fn delete_list(&self) -> Result<(), DomainError> {
        self.enter("cache.delete_list")?;
        if !self.enabled {
            return Ok(());
        }
        self.entries.write().await.remove(LIST_KEY);
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.enter("cache.clear")?;
        if !self.enabled {
            return Ok(());
        }
        self.entries.write().await.clear();
        Ok(())
    }
}

// ============================================================================
// Mock TaskRepository
// ============================================================================

/// In-memory store applying the same timestamp policy as the SQL one.
#[derive(Clone)]
pub struct MockTaskRepository {
    tasks: Arc<RwLock<HashMap<i64, Task>>>,
    current_id: Arc<AtomicI64>,
    should_fail: Arc<AtomicBool>,
    log: CallLog,
}

impl MockTaskRepository {
    pub fn new(log: CallLog) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            current_id: Arc::new(AtomicI64::new(0)),
            should_fail: Arc::new(AtomicBool::new(false)),
            log,
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn get(&self, id: i64) -> Option<Task> {
        self.tasks.read().await.get(&id).cloned()
    }

    fn enter(&self, call: &str) -> Result<(), DomainError> {
        self.log.push(call);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Database("forced error".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn create(&self, task: &Task) -> Result<Task, DomainError> {
        self.enter("store.create")?;
        let now = Utc::now();
        let id = self.current_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Task {
            id,
            title: task.title.clone(),
            updated: now,
            completed: task.complete.then_some(now),
            complete: task.complete,
        };
        self.tasks.write().await.insert(id, created.clone());
        Ok(created)
    }

    async fn read(&self, id: i64) -> Result<Task, DomainError> {
        self.enter("store.read")?;
        self.tasks
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("todo {} not found", id)))
    }

    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        self.enter("store.update")?;
        let mut tasks = self.tasks.write().await;
        let stored = tasks
            .get_mut(&task.id)
            .ok_or_else(|| DomainError::NotFound(format!("todo {} not found", task.id)))?;

        let now = Utc::now();
        stored.title = task.title.clone();
        stored.updated = now;
        if task.complete && !stored.complete {
            stored.completed = Some(now);
        }
        if !task.complete && stored.complete {
            stored.completed = None;
        }
        stored.complete = task.complete;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.enter("store.delete")?;
        self.tasks.write().await.remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<TaskList, DomainError> {
        self.enter("store.list")?;
        let mut tasks: TaskList = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(|a, b| b.updated.cmp(&a.updated));
        Ok(tasks)
    }
}
