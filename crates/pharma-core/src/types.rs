//! # Domain Types
//!
//! Core domain types used throughout the Pharma ERP.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌──────────────────────────┐         │
//! │  │  Order (input)      │          │  CostBreakdown (output)  │         │
//! │  │  ─────────────────  │ compute  │  ──────────────────────  │         │
//! │  │  raw_materials[]    │ ───────► │  raw/packaging/subtotal  │         │
//! │  │  packaging[]        │          │  tax, total_with_tax     │         │
//! │  │  materials_cost?    │          │  margin, revenue, profit │         │
//! │  │  total_material..?  │          │  percentages             │         │
//! │  │  fees, margin?      │          └──────────────────────────┘         │
//! │  └─────────────────────┘                                                │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    LineItem     │   │    TaxRate      │                              │
//! │  │  quantity       │   │  bps (u32)      │                              │
//! │  │  unit_price     │   │  1400 = 14%     │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::numeric::{lenient_decimal, NumericValue};

// =============================================================================
// Tax Rate
// =============================================================================

/// Configurable tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1400 bps = 14%.
///
/// Used by quotations, whose VAT is set per document. The order cost engine
/// does not read it; it always applies [`crate::VAT_RATE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (1400 bps → 0.14).
    pub fn fraction(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }

    /// Returns the rate as a percentage (1400 bps → 14).
    pub fn percentage(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }

    /// Applies the rate to an amount without rounding.
    pub fn apply(&self, amount: Money) -> Money {
        amount * self.fraction()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A `{ quantity, unitPrice }` pair contributing to a material or packaging total.
///
/// Either field may be a number, a numeric string, or missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    #[serde(default)]
    pub quantity: Option<NumericValue>,
    #[serde(default)]
    pub unit_price: Option<NumericValue>,
}

impl LineItem {
    /// Creates a line item from any number-or-string inputs.
    pub fn new(quantity: impl Into<NumericValue>, unit_price: impl Into<NumericValue>) -> Self {
        LineItem {
            quantity: Some(quantity.into()),
            unit_price: Some(unit_price.into()),
        }
    }

    /// `quantity × unit_price`, with malformed fields counting as zero.
    ///
    /// Saturates at the `Decimal` bounds.
    pub fn line_total(&self) -> Money {
        let quantity = lenient_decimal(self.quantity.as_ref());
        let unit_price = lenient_decimal(self.unit_price.as_ref());
        Money::new(quantity) * unit_price
    }

    /// Reads a stored line-item list without failing the whole order.
    ///
    /// A non-array value reads as no list. Array elements that are not
    /// `{ quantity, unitPrice }` objects are dropped.
    pub fn list_from_json(value: serde_json::Value) -> Option<Vec<LineItem>> {
        match value {
            serde_json::Value::Array(elements) => Some(
                elements
                    .into_iter()
                    .filter_map(|element| serde_json::from_value(element).ok())
                    .collect(),
            ),
            _ => None,
        }
    }
}

fn lenient_line_items<'de, D>(deserializer: D) -> Result<Option<Vec<LineItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<serde_json::Value>::deserialize(deserializer)?.and_then(LineItem::list_from_json))
}

// =============================================================================
// Order
// =============================================================================

/// An order as read from storage. Read-only to the cost engine.
///
/// Cost inputs come in several historical shapes; see
/// [`crate::costing::aggregate`] for how they are reconciled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Order identifier.
    pub id: String,

    /// Human-readable order number shown in reports.
    #[serde(default)]
    pub reference: Option<String>,

    /// Customer display name shown in reports.
    #[serde(default)]
    pub customer_name: Option<String>,

    /// Itemized raw materials.
    #[serde(default, deserialize_with = "lenient_line_items")]
    pub raw_materials: Option<Vec<LineItem>>,

    /// Itemized packaging materials.
    #[serde(default, deserialize_with = "lenient_line_items")]
    pub packaging_materials: Option<Vec<LineItem>>,

    /// Pre-computed raw materials cost; wins over line items when a finite number.
    #[serde(default)]
    pub materials_cost: Option<NumericValue>,

    /// Pre-computed packaging cost; wins over line items when a finite number.
    #[serde(default)]
    pub packaging_cost: Option<NumericValue>,

    /// Legacy lump sum from before itemization.
    #[serde(default)]
    pub total_material_cost: Option<NumericValue>,

    /// Non-material costs (transportation etc.), taxable.
    #[serde(default)]
    pub total_additional_fees: Option<NumericValue>,

    /// Stored default margin (percent of revenue).
    #[serde(default)]
    pub profit_margin_percentage: Option<NumericValue>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates an order with only an id; every cost field is absent.
    pub fn new(id: impl Into<String>) -> Self {
        Order {
            id: id.into(),
            ..Order::default()
        }
    }
}

// =============================================================================
// Cost Breakdown
// =============================================================================

/// Share of each cost component in the pre-tax total, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CostPercentages {
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub raw_materials_percent: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub packaging_percent: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub additional_fees_percent: Decimal,
}

impl CostPercentages {
    /// All three shares at zero (used when the pre-tax total is not positive).
    pub const fn zero() -> Self {
        CostPercentages {
            raw_materials_percent: Decimal::ZERO,
            packaging_percent: Decimal::ZERO,
            additional_fees_percent: Decimal::ZERO,
        }
    }

    /// Sum of the three shares.
    pub fn total(&self) -> Decimal {
        self.raw_materials_percent + self.packaging_percent + self.additional_fees_percent
    }
}

/// The full financial picture of one order.
///
/// Built fresh by [`crate::costing::compute_order_costs`] on every request and
/// never patched afterwards.
///
/// ## Invariants
/// - `subtotal == raw_materials_cost + packaging_cost`
/// - `tax_amount == (subtotal + additional_fees) × VAT_RATE`
/// - `total_with_tax == subtotal + additional_fees + tax_amount`
/// - `profit == revenue - total_with_tax`
/// - `0 <= profit_margin <= 95`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CostBreakdown {
    pub order_id: String,
    pub raw_materials_cost: Money,
    pub packaging_cost: Money,
    pub subtotal: Money,
    pub additional_fees: Money,
    pub tax_amount: Money,
    /// Cost of goods including VAT.
    pub total_with_tax: Money,
    /// Margin actually used, after clamping.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub profit_margin: Decimal,
    pub revenue: Money,
    pub profit: Money,
    pub percentages: CostPercentages,
}

impl CostBreakdown {
    /// Pre-tax total: materials, packaging and additional fees.
    pub fn pre_tax_total(&self) -> Money {
        self.subtotal + self.additional_fees
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
