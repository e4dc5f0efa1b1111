use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds from the Unix epoch to `0001-01-01T00:00:00Z`.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// The timestamp written in place of an unset `completed` value.
pub fn zero_time() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIME_SECS, 0).unwrap_or_default()
}

/// A single todo item.
///
/// `complete` is true exactly when `completed` carries a timestamp. On the
/// wire `completed` is always present and an unset value is encoded as
/// [`zero_time`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub updated: DateTime<Utc>,
    #[serde(with = "zero_time_format")]
    pub completed: Option<DateTime<Utc>>,
    pub complete: bool,
}

/// Tasks ordered by descending `updated`.
pub type TaskList = Vec<Task>;

impl Task {
    /// Builds an unsaved task. The id and timestamps are assigned by the store.
    pub fn new(title: impl Into<String>, complete: bool) -> Self {
        Self {
            id: 0,
            title: title.into(),
            updated: zero_time(),
            completed: None,
            complete,
        }
    }

    /// Builds the input of an update: only id, title and the complete flag
    /// are known to the caller.
    pub fn for_update(id: i64, title: impl Into<String>, complete: bool) -> Self {
        Self {
            id,
            ..Self::new(title, complete)
        }
    }

    /// Cache key of this task.
    pub fn key(&self) -> String {
        Self::key_for(self.id)
    }

    pub fn key_for(id: i64) -> String {
        id.to_string()
    }

    pub fn is_consistent(&self) -> bool {
        self.complete == self.completed.is_some()
    }
}

mod zero_time_format {
    use super::zero_time;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.unwrap_or_else(zero_time).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
        Ok(value.filter(|t| *t != zero_time()))
    }
}
