use sea_orm::DbErr;

/// Failures surfaced by the stores layer.
///
/// Everything except `DuplicateEmail` maps to a 5xx response; no store
/// operation is retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("database error during {operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: DbErr,
    },
}

impl StoreError {
    pub fn database(operation: &str, source: DbErr) -> Self {
        StoreError::Database {
            operation: operation.to_string(),
            source,
        }
    }
}
