use coursehub_core::error::CoreError;

/// Error returned by repository methods that enforce domain rules inside a
/// transaction.
///
/// Rule violations are detected after locks are taken, so they surface from
/// the repository rather than the handler. The transaction is rolled back
/// when it is dropped on the error path.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
