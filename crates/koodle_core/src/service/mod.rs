//! Use-case services orchestrating repositories for callers.
//!
//! # Responsibility
//! - Provide stable entry points for presentation layers.
//! - Keep business rules (accrual, idempotence, session scoping) out of
//!   storage code.

pub mod auth_service;
pub mod task_service;
