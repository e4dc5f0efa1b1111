use std::sync::Arc;
use taskcache_application::TaskStorage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<TaskStorage>,
}

impl AppState {
    pub fn new(storage: Arc<TaskStorage>) -> Self {
        Self { storage }
    }
}
