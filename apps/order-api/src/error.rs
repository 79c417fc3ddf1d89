//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Order API                          │
//! │                                                                         │
//! │  Handler: Result<HttpResponse, ApiError>                                │
//! │         │                                                               │
//! │         ├── ValidationError ──► VALIDATION_ERROR ──► 400                │
//! │         ├── DbError::NotFound ──► NOT_FOUND ─────► 404                  │
//! │         ├── other DbError ──► DATABASE_ERROR ────► 500 (details logged) │
//! │         └── malformed body ──► VALIDATION_ERROR ──► 400                 │
//! │                                                                         │
//! │  Body: { "code": "NOT_FOUND", "message": "Order not found: ..." }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use pharma_core::{CoreError, ValidationError};
use pharma_db::DbError;
use serde::{Deserialize, Serialize};

/// Error body returned by every failing request.
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "profitMarginPercentage must be between 0 and 100"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(entity, &id),
            DbError::Duplicate { column, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", column, value),
            ),
            DbError::Invalid(e) => ApiError::validation(e.to_string()),
            unreadable @ DbError::InvalidData { .. } => {
                tracing::error!("{}", unreadable);
                ApiError::new(ErrorCode::DatabaseError, "Stored order data is unreadable")
            }
            DbError::Unavailable(e) => {
                tracing::error!("Order store unavailable: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Order store unavailable")
            }
            DbError::Migration(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::Query(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::NoPendingOverride { order_id } => ApiError::validation(format!(
                "No margin override pending for order {}",
                order_id
            )),
            other => {
                tracing::error!("Core operation failed: {}", other);
                ApiError::internal("Internal error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::not_found("Order", "x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DbError::Unavailable("pool is closed".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let err = ApiError::from(DbError::not_found("Order", "abc"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order not found: abc");
    }

    #[test]
    fn test_query_failure_hides_details() {
        let err = ApiError::from(DbError::Query("near \"SELEC\": syntax error".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_rejected_order_is_a_validation_error() {
        let err = ApiError::from(DbError::Invalid(ValidationError::Required {
            field: "reference".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "reference is required");

        let err = ApiError::from(DbError::Duplicate {
            column: "orders.reference".to_string(),
            value: "PO-1".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "orders.reference 'PO-1' already exists");
    }

    #[test]
    fn test_validation_error_message_is_kept() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "orderId".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("orderId"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Order", "abc")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "NOT_FOUND", "message": "Order not found: abc"})
        );
    }
}
