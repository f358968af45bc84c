//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;
use tutor_core::model::QuizError;

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("total item count must be positive")]
    NoItems,
}
