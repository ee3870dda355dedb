//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD APIs over `tasks` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Task::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `complete_if_pending` checks and flips the completion flag in one
//!   statement, so at most one caller ever observes the pending -> complete
//!   transition for a given task.

use crate::db::DbError;
use crate::model::date::CalendarDate;
use crate::model::task::{Task, TaskId, TaskValidationError, UserId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    task_id,
    user_id,
    task_name,
    completed,
    date
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task and points persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing one user's tasks.
#[derive(Debug, Clone)]
pub struct TaskListQuery {
    /// Owner whose tasks are visible to the query.
    pub user_id: UserId,
    /// Optional creation-date filter.
    pub date: Option<CalendarDate>,
    /// Optional completion-flag filter.
    pub completed: Option<bool>,
}

impl TaskListQuery {
    /// All tasks owned by `user_id`, with no further filtering.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            date: None,
            completed: None,
        }
    }

    /// Tasks owned by `user_id` created on `date`.
    pub fn for_day(user_id: UserId, date: CalendarDate) -> Self {
        Self {
            user_id,
            date: Some(date),
            completed: None,
        }
    }
}

/// Repository interface for owner-scoped task operations.
pub trait TaskRepository {
    /// Persists one task row and returns its stable id.
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Fetches one task by id, visible only to its owner.
    fn get_task(&self, user_id: UserId, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists tasks matching the query filters.
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    /// Flips `completed` to true only when currently false.
    ///
    /// Returns `true` when this call performed the transition and `false`
    /// when the task was missing, already complete, or owned by another
    /// user. The check and the flip happen in one statement.
    fn complete_if_pending(&self, user_id: UserId, id: TaskId) -> RepoResult<bool>;
    /// Counts completed tasks created by `user_id` on `date`.
    fn count_completed_on(&self, user_id: UserId, date: &CalendarDate) -> RepoResult<u32>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                task_id,
                user_id,
                task_name,
                completed,
                date
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                task.task_id.to_string(),
                task.user_id.to_string(),
                task.name.as_str(),
                bool_to_int(task.completed),
                task.date.as_str(),
            ],
        )?;

        Ok(task.task_id)
    }

    fn get_task(&self, user_id: UserId, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE task_id = ?1
               AND user_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE user_id = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(query.user_id.to_string())];

        if let Some(date) = &query.date {
            sql.push_str(" AND date = ?");
            bind_values.push(Value::Text(date.as_str().to_string()));
        }

        if let Some(completed) = query.completed {
            sql.push_str(" AND completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        sql.push_str(" ORDER BY created_at ASC, task_id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn complete_if_pending(&self, user_id: UserId, id: TaskId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET completed = 1
             WHERE task_id = ?1
               AND user_id = ?2
               AND completed = 0;",
            params![id.to_string(), user_id.to_string()],
        )?;

        Ok(changed == 1)
    }

    fn count_completed_on(&self, user_id: UserId, date: &CalendarDate) -> RepoResult<u32> {
        let count = self.conn.query_row(
            "SELECT COUNT(*)
             FROM tasks
             WHERE user_id = ?1
               AND date = ?2
               AND completed = 1;",
            params![user_id.to_string(), date.as_str()],
            |row| row.get::<_, u32>(0),
        )?;

        Ok(count)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let task_id_text: String = row.get("task_id")?;
    let task_id = Uuid::parse_str(&task_id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{task_id_text}` in tasks.task_id"))
    })?;

    let user_id_text: String = row.get("user_id")?;
    let user_id = Uuid::parse_str(&user_id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{user_id_text}` in tasks.user_id"))
    })?;

    let date_text: String = row.get("date")?;
    let date = CalendarDate::parse(&date_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in tasks.date"))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let task = Task {
        task_id,
        user_id,
        name: row.get("task_name")?,
        completed,
        date,
    };
    task.validate()?;
    Ok(task)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
