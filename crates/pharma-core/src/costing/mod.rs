//! # Order Cost Engine
//!
//! One pure pipeline turns an [`Order`] into a [`CostBreakdown`]. Every
//! caller (history view, CSV/JSON export, HTTP endpoint, margin editor) goes
//! through [`compute_order_costs`]; nobody re-derives totals locally.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order ──► aggregate::resolve_material_costs  → raw, packaging         │
//! │              │                                                          │
//! │              ▼  subtotal = raw + packaging, fees = totalAdditionalFees  │
//! │            tax::apply_vat                     → tax, total_with_tax    │
//! │              │                                                          │
//! │              ▼  margin = override ?? stored ?? 20                       │
//! │            revenue::solve_revenue             → margin, revenue, profit│
//! │              │                                                          │
//! │              ▼                                                          │
//! │            shares::cost_shares                → percentages            │
//! │              │                                                          │
//! │              ▼                                                          │
//! │            CostBreakdown                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never fails: unparsable numbers count as zero and margins are
//! clamped, with the clamped value reported back in `profit_margin`.

pub mod aggregate;
pub mod revenue;
pub mod shares;
pub mod tax;

use rust_decimal::Decimal;

use crate::money::Money;
use crate::numeric::lenient_decimal;
use crate::types::{CostBreakdown, Order};
use crate::DEFAULT_PROFIT_MARGIN_PERCENT;

/// Computes the full cost breakdown of an order.
///
/// `margin_override`, when given, replaces the order's stored margin for this
/// computation only. Identical inputs always give identical output.
pub fn compute_order_costs(order: &Order, margin_override: Option<Decimal>) -> CostBreakdown {
    let materials = aggregate::resolve_material_costs(order);
    let subtotal = materials.subtotal();
    let additional_fees = Money::new(lenient_decimal(order.total_additional_fees.as_ref()));

    let taxed = tax::apply_vat(subtotal, additional_fees);

    let margin_input = margin_override.unwrap_or_else(|| stored_margin_percent(order));
    let solution = revenue::solve_revenue(taxed.total_with_tax, margin_input);

    let percentages = shares::cost_shares(materials.raw_materials, materials.packaging, additional_fees);

    CostBreakdown {
        order_id: order.id.clone(),
        raw_materials_cost: materials.raw_materials,
        packaging_cost: materials.packaging,
        subtotal,
        additional_fees,
        tax_amount: taxed.tax_amount,
        total_with_tax: taxed.total_with_tax,
        profit_margin: solution.profit_margin,
        revenue: solution.revenue,
        profit: solution.profit,
        percentages,
    }
}

/// The order's persisted margin, or the default when absent or unparsable.
///
/// A stored `0` is a real 0% margin and is kept.
pub fn stored_margin_percent(order: &Order) -> Decimal {
    order
        .profit_margin_percentage
        .as_ref()
        .and_then(|margin| margin.to_decimal())
        .unwrap_or(DEFAULT_PROFIT_MARGIN_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericValue;
    use crate::types::LineItem;
    use rust_decimal_macros::dec;

    fn itemized_order() -> Order {
        Order {
            raw_materials: Some(vec![LineItem::new(10.0, 5.0)]),
            packaging_materials: Some(Vec::new()),
            total_additional_fees: Some(NumericValue::Number(50.0)),
            profit_margin_percentage: Some(NumericValue::Number(20.0)),
            ..Order::new("ord-a")
        }
    }

    #[test]
    fn test_itemized_order_breakdown() {
        let breakdown = compute_order_costs(&itemized_order(), None);

        assert_eq!(breakdown.order_id, "ord-a");
        assert_eq!(breakdown.subtotal.amount(), dec!(50));
        assert_eq!(breakdown.additional_fees.amount(), dec!(50));
        assert_eq!(breakdown.tax_amount.amount(), dec!(14));
        assert_eq!(breakdown.total_with_tax.amount(), dec!(114));
        assert_eq!(breakdown.profit_margin, dec!(20));
        assert_eq!(breakdown.revenue.amount(), dec!(142.5));
        assert_eq!(breakdown.profit.amount(), dec!(28.5));
        assert_eq!(breakdown.percentages.raw_materials_percent, dec!(50));
        assert_eq!(breakdown.percentages.additional_fees_percent, dec!(50));
    }

    #[test]
    fn test_legacy_order_with_zero_margin() {
        let order = Order {
            total_material_cost: Some(NumericValue::from("200")),
            total_additional_fees: Some(NumericValue::Number(0.0)),
            profit_margin_percentage: Some(NumericValue::Number(0.0)),
            ..Order::new("ord-b")
        };
        let breakdown = compute_order_costs(&order, None);

        assert_eq!(breakdown.raw_materials_cost.amount(), dec!(200));
        assert_eq!(breakdown.tax_amount.amount(), dec!(28));
        assert_eq!(breakdown.total_with_tax.amount(), dec!(228));
        assert_eq!(breakdown.profit_margin, Decimal::ZERO);
        assert_eq!(breakdown.revenue.amount(), dec!(228));
        assert!(breakdown.profit.is_zero());
    }

    #[test]
    fn test_override_wins_over_stored_margin() {
        let breakdown = compute_order_costs(&itemized_order(), Some(dec!(50)));
        assert_eq!(breakdown.profit_margin, dec!(50));
        assert_eq!(breakdown.revenue.amount(), dec!(228));
    }

    #[test]
    fn test_override_of_zero_is_honoured() {
        let breakdown = compute_order_costs(&itemized_order(), Some(Decimal::ZERO));
        assert_eq!(breakdown.revenue, breakdown.total_with_tax);
    }

    #[test]
    fn test_clamped_margin_is_reported() {
        for margin in [dec!(95), dec!(150), dec!(500)] {
            let breakdown = compute_order_costs(&itemized_order(), Some(margin));
            assert_eq!(breakdown.profit_margin, dec!(95));
            assert_eq!(breakdown.revenue, breakdown.total_with_tax * dec!(20));
        }
    }

    #[test]
    fn test_missing_or_garbage_margin_uses_default() {
        let mut order = itemized_order();
        order.profit_margin_percentage = None;
        assert_eq!(stored_margin_percent(&order), dec!(20));

        order.profit_margin_percentage = Some(NumericValue::from("twenty"));
        assert_eq!(stored_margin_percent(&order), dec!(20));

        order.profit_margin_percentage = Some(NumericValue::from("35"));
        assert_eq!(stored_margin_percent(&order), dec!(35));
    }

    #[test]
    fn test_empty_order_is_all_zero() {
        let breakdown = compute_order_costs(&Order::new("ord-empty"), None);
        assert!(breakdown.total_with_tax.is_zero());
        assert!(breakdown.revenue.is_zero());
        assert_eq!(breakdown.profit_margin, dec!(20));
        assert_eq!(breakdown.percentages.total(), Decimal::ZERO);
    }

    #[test]
    fn test_string_fees_are_parsed() {
        let mut order = itemized_order();
        order.total_additional_fees = Some(NumericValue::from("50.00"));
        assert_eq!(
            compute_order_costs(&order, None),
            compute_order_costs(&itemized_order(), None)
        );
    }
}
