//! Systematic Withdrawal Plan projections.
//!
//! A lump sum is held for a number of years, then drawn down every month
//! with withdrawals that rise yearly with inflation. At the end the corpus
//! is redeemed and the gain above [`LTCG_EXEMPTION`] is taxed at a flat rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

pub mod schedule;
pub mod withdrawal_plan;

/// Capital gain exempt from tax on final redemption.
pub const LTCG_EXEMPTION: Money = dec!(100_000);

pub(crate) const MONTHS_PER_YEAR: u32 = 12;

/// Flat tax on the part of `capital_gain` above the exemption.
///
/// `tax_rate` is a fraction in `0..=1`, so neither result can overflow.
pub(crate) fn redemption_tax(capital_gain: Money, tax_rate: Rate) -> (Money, Money) {
    if capital_gain <= LTCG_EXEMPTION {
        return (Decimal::ZERO, Decimal::ZERO);
    }
    let taxable_gain = capital_gain - LTCG_EXEMPTION;
    (taxable_gain, taxable_gain * tax_rate)
}
