//! Points ledger repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the (user, date) upsert used by point accrual.
//! - Keep ledger reads owner-scoped.
//!
//! # Invariants
//! - `award` creates-or-increments in a single statement; two interleaved
//!   awards can never lose an increment.
//! - At most one ledger row exists per (user, date), enforced by the table's
//!   composite primary key.

use crate::model::date::CalendarDate;
use crate::model::points::PointsEntry;
use crate::model::task::UserId;
use crate::repo::task_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

/// Repository interface for the per-user-per-day points ledger.
pub trait PointsRepository {
    /// Adds `amount` to the (user, date) ledger row, creating it when
    /// absent. Returns the new total.
    fn award(&self, user_id: UserId, date: &CalendarDate, amount: u32) -> RepoResult<u32>;
    /// Fetches the ledger row for (user, date), if one exists.
    fn entry(&self, user_id: UserId, date: &CalendarDate) -> RepoResult<Option<PointsEntry>>;
}

/// SQLite-backed points ledger repository.
pub struct SqlitePointsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePointsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PointsRepository for SqlitePointsRepository<'_> {
    fn award(&self, user_id: UserId, date: &CalendarDate, amount: u32) -> RepoResult<u32> {
        self.conn.execute(
            "INSERT INTO points (user_id, date, points)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (user_id, date)
             DO UPDATE SET points = points + excluded.points;",
            params![user_id.to_string(), date.as_str(), amount],
        )?;

        match self.entry(user_id, date)? {
            Some(entry) => Ok(entry.points),
            None => Err(RepoError::InvalidData(format!(
                "points row missing after upsert for user {user_id} on {date}"
            ))),
        }
    }

    fn entry(&self, user_id: UserId, date: &CalendarDate) -> RepoResult<Option<PointsEntry>> {
        let row = self
            .conn
            .query_row(
                "SELECT user_id, date, points
                 FROM points
                 WHERE user_id = ?1
                   AND date = ?2;",
                params![user_id.to_string(), date.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>("user_id")?,
                        row.get::<_, String>("date")?,
                        row.get::<_, i64>("points")?,
                    ))
                },
            )
            .optional()?;

        let Some((user_id_text, date_text, points)) = row else {
            return Ok(None);
        };

        let user_id = Uuid::parse_str(&user_id_text).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid uuid value `{user_id_text}` in points.user_id"
            ))
        })?;
        let date = CalendarDate::parse(&date_text).map_err(|_| {
            RepoError::InvalidData(format!("invalid date value `{date_text}` in points.date"))
        })?;
        let points = u32::try_from(points).map_err(|_| {
            RepoError::InvalidData(format!("negative total `{points}` in points.points"))
        })?;

        Ok(Some(PointsEntry {
            user_id,
            date,
            points,
        }))
    }
}
