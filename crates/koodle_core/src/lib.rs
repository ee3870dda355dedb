//! Core domain logic for the koodle to-do tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{CalendarDate, DateParseError};
pub use model::points::{PointsEntry, POINTS_PER_COMPLETION};
pub use model::session::Session;
pub use model::task::{Task, TaskId, TaskValidationError, UserId};
pub use repo::account_repo::{
    AccountDirectory, AuthError, AuthResult, SqliteAccountDirectory,
};
pub use repo::points_repo::{PointsRepository, SqlitePointsRepository};
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskListQuery, TaskRepository,
};
pub use service::auth_service::AuthService;
pub use service::task_service::TaskService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
