//! # Cost Aggregation
//!
//! Resolves the raw-materials and packaging costs of an order from whichever
//! shape the order was recorded in.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw materials                      packaging                           │
//! │  ─────────────                      ─────────                           │
//! │  1. materialsCost (finite number)   1. packagingCost (finite number)    │
//! │  2. Σ rawMaterials q × p            2. Σ packagingMaterials q × p       │
//! │                                                                         │
//! │  3. Legacy fallback, only when BOTH of the above are exactly 0:         │
//! │     raw = totalMaterialCost (if it parses to non-zero), packaging = 0   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::{LineItem, Order};

/// Raw-materials and packaging cost of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialCosts {
    pub raw_materials: Money,
    pub packaging: Money,
}

impl MaterialCosts {
    /// `raw_materials + packaging`.
    pub fn subtotal(&self) -> Money {
        self.raw_materials + self.packaging
    }
}

/// Sums `quantity × unit_price` over the items.
///
/// A missing or empty sequence contributes zero, as does any malformed field.
pub fn sum_line_items(items: Option<&[LineItem]>) -> Money {
    items
        .unwrap_or_default()
        .iter()
        .map(LineItem::line_total)
        .sum()
}

/// Resolves both material costs for an order.
pub fn resolve_material_costs(order: &Order) -> MaterialCosts {
    let raw_materials = order
        .materials_cost
        .as_ref()
        .and_then(|cost| cost.as_finite_number())
        .map(Money::new)
        .unwrap_or_else(|| sum_line_items(order.raw_materials.as_deref()));

    let packaging = order
        .packaging_cost
        .as_ref()
        .and_then(|cost| cost.as_finite_number())
        .map(Money::new)
        .unwrap_or_else(|| sum_line_items(order.packaging_materials.as_deref()));

    if raw_materials.is_zero() && packaging.is_zero() {
        if let Some(lump_sum) = legacy_lump_sum(order) {
            return MaterialCosts {
                raw_materials: lump_sum,
                packaging: Money::zero(),
            };
        }
    }

    MaterialCosts {
        raw_materials,
        packaging,
    }
}

/// `totalMaterialCost` from orders recorded before itemization, when non-zero.
fn legacy_lump_sum(order: &Order) -> Option<Money> {
    order
        .total_material_cost
        .as_ref()
        .and_then(|total| total.to_decimal())
        .map(Money::new)
        .filter(|total| !total.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericValue;
    use rust_decimal_macros::dec;

    fn money(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount)
    }

    #[test]
    fn test_sum_line_items() {
        let items = vec![
            LineItem::new(10.0, 5.0),
            LineItem::new("2", "12.25"),
            LineItem::new("oops", 100.0),
        ];
        assert_eq!(sum_line_items(Some(items.as_slice())), money(dec!(74.5)));
        assert_eq!(sum_line_items(Some(Vec::new().as_slice())), Money::zero());
        assert_eq!(sum_line_items(None), Money::zero());
    }

    #[test]
    fn test_itemized_order() {
        let order = Order {
            raw_materials: Some(vec![LineItem::new(10.0, 5.0)]),
            packaging_materials: Some(vec![LineItem::new(4.0, 2.5)]),
            ..Order::new("ord-1")
        };
        let costs = resolve_material_costs(&order);
        assert_eq!(costs.raw_materials, money(dec!(50)));
        assert_eq!(costs.packaging, money(dec!(10)));
        assert_eq!(costs.subtotal(), money(dec!(60)));
    }

    #[test]
    fn test_precomputed_cost_wins_over_line_items() {
        let order = Order {
            raw_materials: Some(vec![LineItem::new(10.0, 5.0)]),
            materials_cost: Some(NumericValue::Number(75.0)),
            ..Order::new("ord-1")
        };
        assert_eq!(resolve_material_costs(&order).raw_materials, money(dec!(75)));
    }

    #[test]
    fn test_precomputed_string_does_not_shadow_line_items() {
        let order = Order {
            packaging_materials: Some(vec![LineItem::new(3.0, 3.0)]),
            packaging_cost: Some(NumericValue::from("0")),
            ..Order::new("ord-1")
        };
        assert_eq!(resolve_material_costs(&order).packaging, money(dec!(9)));
    }

    #[test]
    fn test_non_finite_precomputed_cost_is_ignored() {
        let order = Order {
            raw_materials: Some(vec![LineItem::new(1.0, 8.0)]),
            materials_cost: Some(NumericValue::Number(f64::NAN)),
            ..Order::new("ord-1")
        };
        assert_eq!(resolve_material_costs(&order).raw_materials, money(dec!(8)));
    }

    #[test]
    fn test_legacy_lump_sum_fallback() {
        let order = Order {
            total_material_cost: Some(NumericValue::from("200")),
            ..Order::new("ord-legacy")
        };
        let costs = resolve_material_costs(&order);
        assert_eq!(costs.raw_materials, money(dec!(200)));
        assert_eq!(costs.packaging, Money::zero());
    }

    #[test]
    fn test_legacy_fallback_never_double_counts() {
        let order = Order {
            packaging_materials: Some(vec![LineItem::new(1.0, 15.0)]),
            total_material_cost: Some(NumericValue::from("200")),
            ..Order::new("ord-1")
        };
        let costs = resolve_material_costs(&order);
        assert_eq!(costs.raw_materials, Money::zero());
        assert_eq!(costs.packaging, money(dec!(15)));
    }

    #[test]
    fn test_large_precomputed_cost_blocks_lump_sum() {
        let order = Order {
            materials_cost: Some(NumericValue::Number(2e12)),
            total_material_cost: Some(NumericValue::from("100")),
            ..Order::new("ord-big")
        };
        let costs = resolve_material_costs(&order);
        assert_eq!(costs.raw_materials, money(dec!(2000000000000)));
        assert_eq!(costs.packaging, Money::zero());
    }

    #[test]
    fn test_legacy_fallback_ignores_zero_and_garbage() {
        for lump in ["0", "n/a", ""] {
            let order = Order {
                total_material_cost: Some(NumericValue::from(lump)),
                ..Order::new("ord-1")
            };
            assert_eq!(resolve_material_costs(&order), MaterialCosts::default());
        }
    }

    #[test]
    fn test_explicit_zero_precomputed_allows_fallback() {
        let order = Order {
            materials_cost: Some(NumericValue::Number(0.0)),
            packaging_cost: Some(NumericValue::Number(0.0)),
            total_material_cost: Some(NumericValue::Number(120.0)),
            ..Order::new("ord-1")
        };
        assert_eq!(resolve_material_costs(&order).raw_materials, money(dec!(120)));
    }
}
