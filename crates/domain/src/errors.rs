use thiserror::Error;

/// Failure kinds surfaced by the cache, the task store and the storage
/// coordinator.
///
/// A cache miss is not an error: cache reads return `Ok(None)` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl DomainError {
    /// Prefixes the message with call-site context, keeping the error kind.
    pub fn context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            Self::CacheUnavailable(msg) => Self::CacheUnavailable(format!("{ctx}: {msg}")),
            Self::NotFound(msg) => Self::NotFound(format!("{ctx}: {msg}")),
            Self::Database(msg) => Self::Database(format!("{ctx}: {msg}")),
            Self::Encoding(msg) => Self::Encoding(format!("{ctx}: {msg}")),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
