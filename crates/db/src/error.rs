use moviedb_core::error::CoreError;
use moviedb_core::validation::Violations;

/// Failure of an entity store operation.
///
/// Domain outcomes (not found, rejected input) travel as [`CoreError`];
/// anything the database itself raised stays a [`sqlx::Error`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<Violations> for StoreError {
    fn from(violations: Violations) -> Self {
        StoreError::Core(CoreError::Validation(violations))
    }
}
