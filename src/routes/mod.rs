pub mod donors;
pub mod panel;
pub mod recipients;
pub mod users;
pub mod volunteers;

use crate::error::AppError;
use sea_orm::DbErr;

/// Logs a failed store call and turns it into an API error.
pub(crate) fn db_failure(operation: &'static str) -> impl Fn(DbErr) -> AppError {
    move |e| {
        tracing::error!(operation, "store operation failed: {}", e);
        AppError::from(e)
    }
}
