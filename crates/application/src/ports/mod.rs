mod cache_store;
mod task_repository;

pub use cache_store::CacheStore;
pub use task_repository::TaskRepository;
