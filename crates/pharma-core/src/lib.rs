//! # pharma-core: Pure Business Logic for the Pharma ERP
//!
//! This crate holds the order cost engine and the small amount of domain logic
//! around it. Everything here is a pure function of its inputs: no database,
//! no network, no clock reads.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pharma ERP Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    ERP Frontend                                 │   │
//! │  │    Order History ──► Margin Editor ──► CSV / JSON Export        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP (order-api)                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pharma-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  costing  │  │  margin   │  │  report   │  │   │
//! │  │   │   Order   │  │ aggregate │  │ override  │  │  CSV/JSON │  │   │
//! │  │   │ Breakdown │  │ tax, rev  │  │  editor   │  │  history  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pharma-db (Database Layer)                   │   │
//! │  │              SQLite orders, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, LineItem, CostBreakdown, TaxRate)
//! - [`money`] - Decimal-backed money type
//! - [`numeric`] - Lenient parsing of number-or-string fields
//! - [`costing`] - The order cost, tax and profitability engine
//! - [`margin_override`] - Margin override requests and the editing session
//! - [`quotation`] - Quotation totals with a configurable VAT rate
//! - [`report`] - Order-history CSV/JSON export
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pharma_core::costing::compute_order_costs;
//! use pharma_core::{LineItem, NumericValue, Order};
//! use rust_decimal_macros::dec;
//!
//! let order = Order {
//!     id: "ord-1".to_string(),
//!     raw_materials: Some(vec![LineItem::new(10.0, 5.0)]),
//!     total_additional_fees: Some(NumericValue::Number(50.0)),
//!     profit_margin_percentage: Some(NumericValue::Number(20.0)),
//!     ..Order::default()
//! };
//!
//! let breakdown = compute_order_costs(&order, None);
//! assert_eq!(breakdown.total_with_tax.amount(), dec!(114));
//! assert_eq!(breakdown.revenue.amount(), dec!(142.5));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod costing;
pub mod error;
pub mod margin_override;
pub mod money;
pub mod numeric;
pub mod quotation;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use costing::compute_order_costs;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use numeric::NumericValue;
pub use types::*;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Statutory VAT applied by the cost engine (14%).
///
/// Quotations carry their own configurable rate; the two are intentionally
/// not unified.
pub const VAT_RATE: Decimal = dec!(0.14);

/// Margin used when an order has no stored margin and no override is given.
pub const DEFAULT_PROFIT_MARGIN_PERCENT: Decimal = dec!(20);

/// Upper bound of the margin actually used by the engine.
pub const MAX_PROFIT_MARGIN_PERCENT: Decimal = dec!(95);

/// At the margin ceiling revenue is `total_with_tax × 20` instead of a division.
pub const REVENUE_CAP_MULTIPLIER: Decimal = dec!(20);

/// Largest margin the persistence boundary accepts for an override.
pub const MAX_MARGIN_OVERRIDE_PERCENT: Decimal = dec!(100);

