//! # Numeric Fields
//!
//! Historical order records store quantities, prices and fees sometimes as
//! JSON numbers and sometimes as strings (`"12.50"`). [`NumericValue`] keeps
//! whatever shape arrived and converts it to a [`Decimal`] on demand.
//!
//! ## Coercion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input                      to_decimal()        lenient_decimal()      │
//! │  ─────────────────────────  ──────────────────  ─────────────────      │
//! │  12.5 (number)              Some(12.5)          12.5                   │
//! │  "12.50" (string)           Some(12.50)         12.50                  │
//! │  " 1.5e3 " (string)         Some(1500)          1500                   │
//! │  "abc" / "" (string)        None                0                      │
//! │  true / [] / {}             None                0                      │
//! │  missing / null             -                   0                      │
//! │  beyond Decimal range       None                0                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

/// A number-or-string field as found in stored order data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum NumericValue {
    /// A JSON number.
    Number(f64),
    /// A string that should contain a decimal number.
    Text(String),
    /// Anything else (bool, array, object). Always coerces to zero.
    Other(serde_json::Value),
}

impl NumericValue {
    /// Parses the value, returning `None` when it is not a usable number.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            NumericValue::Number(n) => decimal_from_f64(*n),
            NumericValue::Text(s) => parse_decimal(s),
            NumericValue::Other(_) => None,
        }
    }

    /// Returns the value only if it arrived as a finite JSON number.
    ///
    /// Numeric strings do not qualify. Pre-computed cost overrides use this
    /// so that a stray `"0"` string never shadows itemized line items.
    pub fn as_finite_number(&self) -> Option<Decimal> {
        match self {
            NumericValue::Number(n) => decimal_from_f64(*n),
            _ => None,
        }
    }
}

impl From<f64> for NumericValue {
    fn from(n: f64) -> Self {
        NumericValue::Number(n)
    }
}

/// Stored as a JSON number, falling back to text if not representable as `f64`.
impl From<Decimal> for NumericValue {
    fn from(value: Decimal) -> Self {
        match value.to_f64() {
            Some(n) => NumericValue::Number(n),
            None => NumericValue::Text(value.to_string()),
        }
    }
}

impl From<&str> for NumericValue {
    fn from(s: &str) -> Self {
        NumericValue::Text(s.to_string())
    }
}

impl From<String> for NumericValue {
    fn from(s: String) -> Self {
        NumericValue::Text(s)
    }
}

/// Parses an optional field, coercing missing or malformed values to zero.
pub fn lenient_decimal(value: Option<&NumericValue>) -> Decimal {
    value
        .and_then(NumericValue::to_decimal)
        .unwrap_or(Decimal::ZERO)
}

/// Parses decimal text. Plain notation first, then scientific (`1.5e3`).
///
/// Values `Decimal` cannot represent (magnitude above ~7.9 × 10^28) are `None`.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Converts a finite `f64` through its shortest round-trip rendering, so
/// `0.1` becomes exactly `0.1` rather than its binary expansion.
pub fn decimal_from_f64(n: f64) -> Option<Decimal> {
    if !n.is_finite() {
        return None;
    }
    parse_decimal(&n.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_numbers_convert_exactly() {
        assert_eq!(NumericValue::Number(0.1).to_decimal(), Some(dec!(0.1)));
        assert_eq!(NumericValue::Number(10.0).to_decimal(), Some(dec!(10)));
        assert_eq!(NumericValue::Number(-3.25).to_decimal(), Some(dec!(-3.25)));
    }

    #[test]
    fn test_strings_are_parsed() {
        assert_eq!(NumericValue::from("12.50").to_decimal(), Some(dec!(12.5)));
        assert_eq!(NumericValue::from("  200 ").to_decimal(), Some(dec!(200)));
        assert_eq!(NumericValue::from("1.5e3").to_decimal(), Some(dec!(1500)));
    }

    #[test]
    fn test_malformed_values_are_none() {
        assert_eq!(NumericValue::from("abc").to_decimal(), None);
        assert_eq!(NumericValue::from("").to_decimal(), None);
        assert_eq!(NumericValue::from("12abc").to_decimal(), None);
        assert_eq!(NumericValue::Number(f64::NAN).to_decimal(), None);
        assert_eq!(NumericValue::Number(f64::INFINITY).to_decimal(), None);
        assert_eq!(
            NumericValue::Other(serde_json::Value::Bool(true)).to_decimal(),
            None
        );
    }

    #[test]
    fn test_large_values_are_kept() {
        assert_eq!(
            NumericValue::Number(2e12).to_decimal(),
            Some(dec!(2000000000000))
        );
        assert_eq!(
            NumericValue::from("-5000000000000").to_decimal(),
            Some(dec!(-5000000000000))
        );
        assert_eq!(
            NumericValue::Number(2e12).as_finite_number(),
            Some(dec!(2000000000000))
        );
    }

    #[test]
    fn test_beyond_decimal_range_is_none() {
        assert_eq!(NumericValue::Number(1e30).to_decimal(), None);
        assert_eq!(NumericValue::from("1e40").to_decimal(), None);
    }

    #[test]
    fn test_lenient_decimal_defaults_to_zero() {
        assert_eq!(lenient_decimal(None), Decimal::ZERO);
        assert_eq!(lenient_decimal(Some(&NumericValue::from("x"))), Decimal::ZERO);
        assert_eq!(lenient_decimal(Some(&NumericValue::Number(7.0))), dec!(7));
    }

    #[test]
    fn test_from_decimal_is_a_number() {
        assert_eq!(NumericValue::from(dec!(35)), NumericValue::Number(35.0));
        assert_eq!(NumericValue::from(dec!(22.5)).to_decimal(), Some(dec!(22.5)));
    }

    #[test]
    fn test_finite_number_ignores_strings() {
        assert_eq!(NumericValue::Number(5.0).as_finite_number(), Some(dec!(5)));
        assert_eq!(NumericValue::from("5").as_finite_number(), None);
    }

    #[test]
    fn test_deserializes_mixed_shapes() {
        let values: Vec<Option<NumericValue>> =
            serde_json::from_str(r#"[10, "5.5", null, true]"#).unwrap();
        assert_eq!(values[0], Some(NumericValue::Number(10.0)));
        assert_eq!(values[1], Some(NumericValue::Text("5.5".to_string())));
        assert_eq!(values[2], None);
        assert!(matches!(values[3], Some(NumericValue::Other(_))));
    }
}
