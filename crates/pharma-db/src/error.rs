//! # Database Error Types
//!
//! What can go wrong between the order store and its callers.
//!
//! ```text
//! sqlx::Error ─────────────┐
//! MigrateError ────────────┼──► DbError ──► ApiError (order-api)
//! serde_json::Error ───────┤    (column context attached)
//! ValidationError ─────────┘
//! ```

use pharma_core::ValidationError;
use thiserror::Error;

/// Order store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row with this id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An insert collided with an existing id or reference.
    ///
    /// `column` is SQLite's `table.column`; `value` is filled in by the
    /// repository when it knows which value collided.
    #[error("{column} '{value}' already exists")]
    Duplicate { column: String, value: String },

    /// The order was rejected before reaching SQLite.
    #[error("Invalid order: {0}")]
    Invalid(#[from] ValidationError),

    /// A JSON cost column could not be read or written.
    #[error("Unreadable {column} for order {order_id}: {source}")]
    InvalidData {
        order_id: String,
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The store cannot be reached: open failed, pool closed or timed out.
    #[error("Order store unavailable: {0}")]
    Unavailable(String),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Any other statement failure.
    #[error("Query failed: {0}")]
    Query(String),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for failures a caller may retry once the store is back.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::Unavailable(_))
    }
}

/// ```text
/// UNIQUE constraint failed: orders.reference  → Duplicate { column: "orders.reference" }
/// PoolClosed / PoolTimedOut / Io              → Unavailable
/// other database message                      → Query
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                match msg.strip_prefix("UNIQUE constraint failed: ") {
                    Some(column) => DbError::Duplicate {
                        column: column.to_string(),
                        value: String::new(),
                    },
                    None => DbError::Query(msg.to_string()),
                }
            }
            sqlx::Error::PoolClosed => DbError::Unavailable("pool is closed".to_string()),
            sqlx::Error::PoolTimedOut => {
                DbError::Unavailable("timed out waiting for a connection".to_string())
            }
            sqlx::Error::Io(e) => DbError::Unavailable(e.to_string()),
            other => DbError::Query(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_order() {
        assert_eq!(
            DbError::not_found("Order", "abc").to_string(),
            "Order not found: abc"
        );

        let source = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let err = DbError::InvalidData {
            order_id: "abc".to_string(),
            column: "raw_materials",
            source,
        };
        assert!(err.to_string().starts_with("Unreadable raw_materials for order abc"));
    }

    #[test]
    fn test_closed_pool_is_unavailable() {
        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(err.is_unavailable());
        assert!(!DbError::not_found("Order", "x").is_unavailable());
    }

    #[test]
    fn test_validation_error_is_invalid() {
        let err: DbError = ValidationError::Required {
            field: "reference".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid order: reference is required");
    }
}
