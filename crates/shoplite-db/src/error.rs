//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! sqlx::Error ──► DbError (this module, transient-store family)
//!                    │
//! CoreError ─────────┼──► WorkflowError (operation boundary)
//!                    │         │
//!                    ▼         ▼
//!              caller distinguishes "fix your input" from "try again"
//! ```

use thiserror::Error;

use shoplite_core::error::{CoreError, ValidationError};

/// Store operation errors - the transient/infrastructure family.
///
/// No automatic retry is layered on top of these; the failure surfaces
/// and the user retries the action.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in the expected shop scope.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A guarded stock write was refused: the product exists but the
    /// delta would take its stock below zero.
    #[error("Stock for product {id} cannot drop below zero (have {available}, delta {delta})")]
    StockConflict {
        id: String,
        available: i64,
        delta: i64,
    },

    /// Unique constraint violation (duplicate email, duplicate id).
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// SQLite reports constraint failures as database errors with
/// recognizable messages; they are categorized here so callers get a
/// typed variant instead of a string.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for repository operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Workflow Error
// =============================================================================

/// Error at the workflow boundary.
///
/// Splits domain rejections (validation, insufficient stock, not found,
/// forbidden - the user's problem) from store failures (transient
/// infrastructure - retry the action). UI layers map these to their two
/// very different kinds of message.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] DbError),
}

impl From<ValidationError> for WorkflowError {
    fn from(err: ValidationError) -> Self {
        WorkflowError::Domain(CoreError::Validation(err))
    }
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Product", "p1");
        assert_eq!(err.to_string(), "Product not found: p1");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_validation_lifts_into_workflow_error() {
        let err: WorkflowError = ValidationError::Required {
            field: "customerName".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            WorkflowError::Domain(CoreError::Validation(_))
        ));
    }
}
