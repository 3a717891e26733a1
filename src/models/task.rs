use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Represents the priority of a task.
/// Stored as lowercase text, constrained by a CHECK in the schema.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(()),
        }
    }
}

/// Request body for `POST /api/tasks`.
///
/// Every field is optional at the serde level so that a missing title or an
/// unknown priority can be reported with a specific message instead of a
/// generic deserialization error.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Must be non-blank; at most 200 characters.
    #[validate(length(max = 200))]
    pub title: Option<String>,

    /// At most 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// One of `low`, `medium`, `high`. Defaults to `medium` only when absent;
    /// an explicit `null` is kept and rejected.
    #[serde(default, deserialize_with = "present")]
    pub priority: Option<serde_json::Value>,
}

impl TaskInput {
    /// The requested priority, the default if the field was omitted, or
    /// `None` if it is not one of the known names.
    pub fn priority(&self) -> Option<TaskPriority> {
        match &self.priority {
            None => Some(TaskPriority::default()),
            Some(value) => value.as_str()?.parse().ok(),
        }
    }
}

/// Wraps any value that is present, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A task input that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
}

/// Request body for `PATCH /api/tasks/{id}/complete`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionUpdate {
    pub completed: Option<serde_json::Value>,
}

impl CompletionUpdate {
    pub fn completed(&self) -> Option<bool> {
        self.completed.as_ref().and_then(serde_json::Value::as_bool)
    }
}

/// Represents a task as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    /// Owner of the task.
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
