//! # Quotations
//!
//! Quotations price a list of line items for a customer before an order
//! exists. Unlike the order cost engine, their VAT is a per-document
//! [`TaxRate`], so a quotation for an exempt customer can carry 0%.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::costing::aggregate::sum_line_items;
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{LineItem, TaxRate};
use crate::validation::validate_tax_rate_bps;

/// A priced quotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quotation {
    pub id: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// VAT in basis points (1400 = 14%).
    pub vat_rate: TaxRate,
}

/// Totals of a [`Quotation`], unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationTotals {
    pub subtotal: Money,
    pub vat_amount: Money,
    pub total: Money,
    /// The VAT rate applied, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub vat_percentage: Decimal,
}

impl QuotationTotals {
    /// Sums the items and applies the quotation's own VAT rate.
    ///
    /// Fails only when the rate exceeds 100%.
    pub fn compute(quotation: &Quotation) -> CoreResult<Self> {
        validate_tax_rate_bps(quotation.vat_rate.bps())?;

        let subtotal = sum_line_items(Some(quotation.items.as_slice()));
        let vat_amount = quotation.vat_rate.apply(subtotal);

        Ok(QuotationTotals {
            subtotal,
            vat_amount,
            total: subtotal + vat_amount,
            vat_percentage: quotation.vat_rate.percentage(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use rust_decimal_macros::dec;

    fn quotation(bps: u32) -> Quotation {
        Quotation {
            id: "q-1".to_string(),
            items: vec![LineItem::new(4.0, "12.5"), LineItem::new("10", 3.0)],
            vat_rate: TaxRate::from_bps(bps),
        }
    }

    #[test]
    fn test_totals_use_configured_rate() {
        let totals = QuotationTotals::compute(&quotation(1000)).unwrap();
        assert_eq!(totals.subtotal.amount(), dec!(80));
        assert_eq!(totals.vat_amount.amount(), dec!(8));
        assert_eq!(totals.total.amount(), dec!(88));
        assert_eq!(totals.vat_percentage, dec!(10));
    }

    #[test]
    fn test_zero_rate_quotation() {
        let totals = QuotationTotals::compute(&quotation(0)).unwrap();
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_rate_above_one_hundred_percent_is_rejected() {
        assert!(matches!(
            QuotationTotals::compute(&quotation(10_001)),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_deserializes_from_camel_case() {
        let json = r#"{"id":"q-9","items":[{"quantity":1,"unitPrice":"9.99"}],"vatRate":1400}"#;
        let quotation: Quotation = serde_json::from_str(json).unwrap();
        let totals = QuotationTotals::compute(&quotation).unwrap();
        assert_eq!(totals.total.amount(), dec!(11.3886));
    }
}
