//! # Revenue Solver
//!
//! Turns a cost of goods and a margin into revenue and profit.
//!
//! The margin is a share of **revenue**, not a markup on cost:
//! ```text
//!   margin 20%  ⇒  cost = 80% of revenue  ⇒  revenue = cost / (1 - 0.20)
//!
//!   cost 114:   revenue = 114 / 0.8 = 142.5   (profit 28.5, 20% of 142.5)
//!   NOT:        revenue = 114 × 1.2 = 136.8   (profit 22.8, only 16.7%)
//! ```
//!
//! The margin is clamped to `[0, 95]` first. At the ceiling the division is
//! replaced by a flat `× 20`.

use rust_decimal::Decimal;

use crate::money::Money;
use crate::{MAX_PROFIT_MARGIN_PERCENT, REVENUE_CAP_MULTIPLIER};

/// Margin actually used, plus the revenue and profit it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueSolution {
    /// Clamped margin, in percent.
    pub profit_margin: Decimal,
    pub revenue: Money,
    pub profit: Money,
}

/// Clamps a margin percentage into `[0, MAX_PROFIT_MARGIN_PERCENT]`.
pub fn clamp_margin_percent(margin_percent: Decimal) -> Decimal {
    margin_percent.clamp(Decimal::ZERO, MAX_PROFIT_MARGIN_PERCENT)
}

/// Solves `revenue = total_with_tax / (1 - margin)` for a margin of revenue.
///
/// ```rust
/// use pharma_core::costing::revenue::solve_revenue;
/// use pharma_core::Money;
/// use rust_decimal_macros::dec;
///
/// let solution = solve_revenue(Money::new(dec!(114)), dec!(20));
/// assert_eq!(solution.revenue.amount(), dec!(142.5));
/// assert_eq!(solution.profit.amount(), dec!(28.5));
/// ```
pub fn solve_revenue(total_with_tax: Money, margin_percent: Decimal) -> RevenueSolution {
    let profit_margin = clamp_margin_percent(margin_percent);
    let fraction = profit_margin / Decimal::ONE_HUNDRED;
    let ceiling = MAX_PROFIT_MARGIN_PERCENT / Decimal::ONE_HUNDRED;

    let revenue = if fraction >= ceiling {
        total_with_tax * REVENUE_CAP_MULTIPLIER
    } else {
        total_with_tax / (Decimal::ONE - fraction)
    };

    RevenueSolution {
        profit_margin,
        revenue,
        profit: revenue - total_with_tax,
    }
}
