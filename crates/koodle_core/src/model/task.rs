//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record and its creation helpers.
//! - Own name validation applied on every write path.
//!
//! # Invariants
//! - `task_id` is stable and never reused for another task.
//! - A task belongs to exactly one user and one calendar date (the date it
//!   was created) and is never moved to another date.
//! - `completed` transitions false -> true at most once and never back.

use crate::model::date::CalendarDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Stable identifier for an account, issued by the account directory.
pub type UserId = Uuid;

/// Canonical domain record for one to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for completion targeting and auditing.
    pub task_id: TaskId,
    /// Owning account ID.
    pub user_id: UserId,
    /// Serialized as `task_name` to match external schema naming.
    #[serde(rename = "task_name")]
    pub name: String,
    /// Completion flag; monotonic false -> true.
    pub completed: bool,
    /// Creation date; never changes after insert.
    pub date: CalendarDate,
}

/// Rejection reason for invalid task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task name is empty after trimming.
    EmptyName,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a new pending task with a generated stable ID.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - `date` is fixed to the provided creation date for the task lifetime.
    pub fn new(user_id: UserId, name: impl Into<String>, date: CalendarDate) -> Self {
        Self::with_id(Uuid::new_v4(), user_id, name, date)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by read paths re-materializing persisted rows where identity
    /// already exists.
    pub fn with_id(
        task_id: TaskId,
        user_id: UserId,
        name: impl Into<String>,
        date: CalendarDate,
    ) -> Self {
        Self {
            task_id,
            user_id,
            name: name.into(),
            completed: false,
            date,
        }
    }

    /// Checks structural validity before persistence.
    ///
    /// # Errors
    /// - `EmptyName` when the name is blank after trimming.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskValidationError};
    use crate::model::date::CalendarDate;
    use uuid::Uuid;

    fn date(value: &str) -> CalendarDate {
        CalendarDate::parse(value).unwrap()
    }

    #[test]
    fn new_task_starts_pending_on_the_given_date() {
        let user = Uuid::new_v4();
        let task = Task::new(user, "buy milk", date("2024-01-01"));

        assert_eq!(task.user_id, user);
        assert_eq!(task.name, "buy milk");
        assert!(!task.completed);
        assert_eq!(task.date, date("2024-01-01"));
    }

    #[test]
    fn validate_rejects_blank_names() {
        let task = Task::new(Uuid::new_v4(), "   ", date("2024-01-01"));
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyName));

        let ok = Task::new(Uuid::new_v4(), "water plants", date("2024-01-01"));
        assert_eq!(ok.validate(), Ok(()));
    }

    #[test]
    fn serializes_name_under_external_column_name() {
        let task = Task::new(Uuid::new_v4(), "buy milk", date("2024-01-01"));
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["task_name"], "buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["date"], "2024-01-01");
    }
}
