//! VAT on the pre-tax total, at the engine's fixed rate.

use crate::money::Money;
use crate::VAT_RATE;

/// VAT and the resulting cost of goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxedCost {
    pub tax_amount: Money,
    pub total_with_tax: Money,
}

/// `tax = (subtotal + fees) × VAT_RATE`, `total = subtotal + fees + tax`.
///
/// No rounding is applied.
pub fn apply_vat(subtotal: Money, additional_fees: Money) -> TaxedCost {
    let tax_base = subtotal + additional_fees;
    let tax_amount = tax_base * VAT_RATE;

    TaxedCost {
        tax_amount,
        total_with_tax: tax_base + tax_amount,
    }
}
