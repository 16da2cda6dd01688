use rusqlite::ErrorCode;
use thiserror::Error;

/// Failure to bring the schema into the expected shape. Fatal at startup.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] r2d2::Error),

    #[error("Schema statement failed: {0}")]
    Statement(#[from] rusqlite::Error),

    #[error("Table {table} is missing column {column}")]
    MissingColumn { table: String, column: String },

    #[error("Table {table} column {column} is declared {found}, expected {expected}")]
    IncompatibleColumn {
        table: String,
        column: String,
        expected: String,
        found: String,
    },

    #[error("Table {table} lacks constraint {constraint}")]
    MissingConstraint { table: String, constraint: String },
}

/// Failure of a read-only analytics query
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] r2d2::Error),

    #[error("Query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Limit must be a positive integer, got {0}")]
    InvalidLimit(i64),
}

/// Failure of a write or lookup against the store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] r2d2::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Sqlite(rusqlite::Error),
}

/// Index benchmark touches both the schema and the query catalog
#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            StoreError::ConstraintViolation(err.to_string())
        } else {
            StoreError::Sqlite(err)
        }
    }
}

pub(crate) fn validate_limit(limit: i64) -> Result<i64, QueryError> {
    if limit <= 0 {
        return Err(QueryError::InvalidLimit(limit));
    }
    Ok(limit)
}
