//! Points ledger domain model.
//!
//! # Responsibility
//! - Define the per-user-per-day accumulated score record.
//!
//! # Invariants
//! - At most one entry exists per (user, date) pair; the row is an upsert
//!   target, not an append log.
//! - `points` is non-negative and only ever grows within a day.

use crate::model::date::CalendarDate;
use crate::model::task::UserId;
use serde::{Deserialize, Serialize};

/// Points awarded for each first-time task completion.
pub const POINTS_PER_COMPLETION: u32 = 10;

/// Accumulated score for one user on one calendar date.
///
/// The date is the *completion* date of the tasks that fed the total, which
/// can differ from their creation date when a task is finished after
/// midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsEntry {
    /// Owning account ID.
    pub user_id: UserId,
    /// Completion date the total is recorded under.
    pub date: CalendarDate,
    /// Accumulated point total.
    pub points: u32,
}
