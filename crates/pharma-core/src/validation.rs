//! # Validation Module
//!
//! Input validation for everything that crosses the persistence boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Cost engine                                                  │
//! │  └── Never rejects: clamps margins, coerces bad numbers to 0           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler / MarginEditor (Rust)                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: order ids, margin overrides, tax rates               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE on order reference                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pharma_core::validation::{validate_margin_override, validate_order_id};
//!
//! validate_order_id("550e8400-e29b-41d4-a716-446655440000").unwrap();
//! assert!(validate_margin_override(35.0).is_ok());
//! assert!(validate_margin_override(120.0).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::numeric::decimal_from_f64;
use crate::MAX_MARGIN_OVERRIDE_PERCENT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest order reference accepted.
pub const MAX_ORDER_REFERENCE_LEN: usize = 50;

/// Highest tax rate accepted, in basis points (100%).
pub const MAX_TAX_RATE_BPS: u32 = 10_000;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an order id.
///
/// ## Rules
/// - Must not be empty
/// - Must be a UUID (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`)
pub fn validate_order_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "orderId".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "orderId".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates a human-readable order reference such as `PO-2024-0042`.
///
/// ## Example
/// ```rust
/// use pharma_core::validation::validate_order_reference;
///
/// assert!(validate_order_reference("PO-2024-0042").is_ok());
/// assert!(validate_order_reference("").is_err());
/// assert!(validate_order_reference("has space").is_err());
/// ```
pub fn validate_order_reference(reference: &str) -> ValidationResult<()> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "reference".to_string(),
        });
    }

    if reference.len() > MAX_ORDER_REFERENCE_LEN {
        return Err(ValidationError::TooLong {
            field: "reference".to_string(),
            max: MAX_ORDER_REFERENCE_LEN,
        });
    }

    if !reference
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/')
    {
        return Err(ValidationError::InvalidFormat {
            field: "reference".to_string(),
            reason: "must contain only letters, numbers, hyphens, underscores and slashes"
                .to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a profit-margin override before it is persisted.
///
/// ## Rules
/// - Must be a finite number
/// - Must lie in `[0, 100]`
///
/// The engine would clamp anything above 95 on its own; the wider range here
/// is what the store accepts, not what the engine uses.
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PUT /api/orders/{id}/profit-margin  { "profitMarginPercentage": 35 }  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_margin_override(35.0) ← THIS FUNCTION                        │
/// │       │                                                                 │
/// │       ├── NaN / ±inf?   → InvalidFormat                                │
/// │       ├── < 0 or > 100? → OutOfRange (0..100)                          │
/// │       └── OK → Decimal(35) → OrderRepository::update_profit_margin     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_margin_override(value: f64) -> ValidationResult<Decimal> {
    let margin = decimal_from_f64(value).ok_or_else(|| ValidationError::InvalidFormat {
        field: "profitMarginPercentage".to_string(),
        reason: "must be a finite number".to_string(),
    })?;

    validate_margin_percent(margin)
}

/// Range check shared by [`validate_margin_override`] and the margin editor.
pub fn validate_margin_percent(margin: Decimal) -> ValidationResult<Decimal> {
    if margin < Decimal::ZERO || margin > MAX_MARGIN_OVERRIDE_PERCENT {
        return Err(ValidationError::OutOfRange {
            field: "profitMarginPercentage".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(margin)
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "vatRate".to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_order_id() {
        assert!(validate_order_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(matches!(
            validate_order_id("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_order_id("ord-1"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_order_reference() {
        assert!(validate_order_reference("PO-2024-0042").is_ok());
        assert!(validate_order_reference("INV/17").is_ok());
        assert!(validate_order_reference("").is_err());
        assert!(validate_order_reference("a b").is_err());
        assert!(validate_order_reference(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_margin_override_bounds_are_inclusive() {
        assert_eq!(validate_margin_override(0.0).unwrap(), Decimal::ZERO);
        assert_eq!(validate_margin_override(100.0).unwrap(), dec!(100));
        assert_eq!(validate_margin_override(22.5).unwrap(), dec!(22.5));
    }

    #[test]
    fn test_margin_override_rejects_out_of_range() {
        assert!(matches!(
            validate_margin_override(-0.5),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_margin_override(100.01),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_margin_override_rejects_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                validate_margin_override(value),
                Err(ValidationError::InvalidFormat { .. })
            ));
        }
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(1400).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
