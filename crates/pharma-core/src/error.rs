//! # Error Types
//!
//! Domain-specific error types for pharma-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pharma-core errors (this file)                                        │
//! │  ├── CoreError        - Export and quotation failures                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pharma-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  order-api errors (in app)                                             │
//! │  └── ApiError         - What the HTTP client sees ({code, message})    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cost engine itself has no error type: malformed inputs degrade to zero
//! and out-of-range margins are clamped.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the fallible operations around the engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Nothing to save: the margin editor has no pending candidate.
    #[error("No margin override pending for order {order_id}")]
    NoPendingOverride { order_id: String },

    /// CSV export failed while writing a record.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export failed.
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The export sink could not be flushed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before anything is persisted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, not a finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
