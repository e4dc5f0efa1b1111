mod task_storage;

pub use task_storage::TaskStorage;
