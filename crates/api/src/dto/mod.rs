mod task;

pub use task::{ErrorResponse, Message, TaskForm};
