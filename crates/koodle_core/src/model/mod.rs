//! Domain model for the task tracker and its points ledger.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep validation rules next to the records they protect.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` and bound to one owner
//!   and one calendar date.
//! - Dates cross module boundaries only as validated `CalendarDate` values.

pub mod date;
pub mod points;
pub mod session;
pub mod task;
