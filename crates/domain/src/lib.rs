//! Taskcache Domain Layer
pub mod config;
pub mod errors;
pub mod task;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use task::{zero_time, Task, TaskList};
