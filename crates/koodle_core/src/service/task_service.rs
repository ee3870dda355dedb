//! Task and points rules engine.
//!
//! # Responsibility
//! - Govern task creation, completion idempotence and point accrual.
//! - Scope every operation to the caller's explicit `Session`.
//!
//! # Invariants
//! - Completing a task awards points at most once, guarded by the
//!   repository's single-statement conditional flip.
//! - Points are recorded under the date of *completion*, while the daily
//!   display aggregate counts by date of *creation*; the two intentionally
//!   diverge for tasks completed after midnight.
//! - Callers supply `today` explicitly; the engine never reads a clock.

use crate::model::date::CalendarDate;
use crate::model::points::{PointsEntry, POINTS_PER_COMPLETION};
use crate::model::session::Session;
use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::repo::points_repo::PointsRepository;
use crate::repo::task_repo::{RepoResult, TaskListQuery, TaskRepository};
use log::{debug, info};

/// Rules engine facade over task and ledger repositories.
pub struct TaskService<T: TaskRepository, P: PointsRepository> {
    tasks: T,
    points: P,
}

impl<T: TaskRepository, P: PointsRepository> TaskService<T, P> {
    /// Creates a service using the provided repository implementations.
    pub fn new(tasks: T, points: P) -> Self {
        Self { tasks, points }
    }

    /// Creates a pending task for the session owner, dated `today`.
    ///
    /// # Contract
    /// - `name` is trimmed; a blank name is a validation error.
    /// - Duplicate names are allowed; tasks are not unique by name.
    pub fn create_task(
        &self,
        session: &Session,
        name: &str,
        today: CalendarDate,
    ) -> RepoResult<Task> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyName.into());
        }

        let task = Task::new(session.user_id, trimmed, today);
        self.tasks.insert_task(&task)?;
        info!(
            "event=task_create module=service status=ok user_id={} task_id={} date={}",
            session.user_id, task.task_id, task.date
        );
        Ok(task)
    }

    /// Marks a task complete and awards points for a first-time completion.
    ///
    /// # Contract
    /// - No state or points change when the task does not exist, belongs to
    ///   another user, or is already complete; those calls succeed as no-ops.
    /// - Points are dated by `today`, the moment of completion, even when
    ///   the task was created on an earlier date.
    pub fn complete_task(
        &self,
        session: &Session,
        task_id: TaskId,
        today: CalendarDate,
    ) -> RepoResult<()> {
        let transitioned = self.tasks.complete_if_pending(session.user_id, task_id)?;
        if !transitioned {
            debug!(
                "event=task_complete module=service status=noop user_id={} task_id={task_id}",
                session.user_id
            );
            return Ok(());
        }

        let total = self
            .points
            .award(session.user_id, &today, POINTS_PER_COMPLETION)?;
        info!(
            "event=task_complete module=service status=ok user_id={} task_id={task_id} \
             awarded={POINTS_PER_COMPLETION} date={today} total={total}",
            session.user_id
        );
        Ok(())
    }

    /// Display aggregate: completed tasks *created* on `date`, times the
    /// accrual rate.
    ///
    /// This re-scans tasks by creation date and can differ from the
    /// persisted ledger total, which accumulates by completion date.
    pub fn daily_points(&self, session: &Session, date: &CalendarDate) -> RepoResult<u32> {
        let completed = self.tasks.count_completed_on(session.user_id, date)?;
        Ok(completed * POINTS_PER_COMPLETION)
    }

    /// Reads the persisted ledger row for the session owner on `date`.
    pub fn points_entry(
        &self,
        session: &Session,
        date: &CalendarDate,
    ) -> RepoResult<Option<PointsEntry>> {
        self.points.entry(session.user_id, date)
    }

    /// Lists the session owner's tasks created on `date`, for re-rendering.
    pub fn tasks_for_day(&self, session: &Session, date: &CalendarDate) -> RepoResult<Vec<Task>> {
        self.tasks
            .list_tasks(&TaskListQuery::for_day(session.user_id, date.clone()))
    }
}
