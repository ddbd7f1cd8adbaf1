//! Database repository layer
//!
//! Each entity has a repository trait (the binding the domain layer depends on)
//! and a MySQL implementation wired up in [`crate::state`].

pub mod appliance_repo;
pub mod appointment_repo;
pub mod report_repo;
pub mod user_repo;

pub use appliance_repo::*;
pub use appointment_repo::*;
pub use report_repo::*;
pub use user_repo::*;

use crate::error::AppError;

/// 唯一键冲突转换为 409，其余原样返回
pub(crate) fn map_unique_violation(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(e),
    }
}
