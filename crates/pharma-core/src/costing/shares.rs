//! Share of each cost component in the pre-tax total. Display only.

use crate::money::Money;
use crate::types::CostPercentages;

/// Percentages of `raw + packaging + fees`; all zero unless that total is positive.
pub fn cost_shares(raw_materials: Money, packaging: Money, additional_fees: Money) -> CostPercentages {
    let pre_tax_total = raw_materials + packaging + additional_fees;
    if !pre_tax_total.is_positive() {
        return CostPercentages::zero();
    }

    CostPercentages {
        raw_materials_percent: raw_materials.percent_of(pre_tax_total),
        packaging_percent: packaging.percent_of(pre_tax_total),
        additional_fees_percent: additional_fees.percent_of(pre_tax_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_even_split() {
        let shares = cost_shares(Money::new(dec!(50)), Money::zero(), Money::new(dec!(50)));
        assert_eq!(shares.raw_materials_percent, dec!(50));
        assert_eq!(shares.packaging_percent, Decimal::ZERO);
        assert_eq!(shares.additional_fees_percent, dec!(50));
    }

    #[test]
    fn test_thirds_close_to_one_hundred() {
        let third = Money::new(dec!(10));
        let shares = cost_shares(third, third, third);
        let drift = (shares.total() - dec!(100)).abs();
        assert!(drift < dec!(0.000000001), "drift was {drift}");
    }

    #[test]
    fn test_zero_total_yields_zero_shares() {
        assert_eq!(
            cost_shares(Money::zero(), Money::zero(), Money::zero()),
            CostPercentages::zero()
        );
    }

    #[test]
    fn test_non_positive_total_yields_zero_shares() {
        let shares = cost_shares(Money::new(dec!(10)), Money::zero(), Money::new(dec!(-30)));
        assert_eq!(shares, CostPercentages::zero());
    }
}
