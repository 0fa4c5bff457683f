use rust_decimal::Decimal;

use crate::error::CorpusError;
use crate::types::{Money, Rate};
use crate::CorpusResult;

/// Lift a checked Decimal operation into a result, naming where it overflowed.
pub fn checked(op: Option<Decimal>, context: &str) -> CorpusResult<Decimal> {
    op.ok_or_else(|| {
        CorpusError::FinancialImpossibility(format!("arithmetic overflow in {context}"))
    })
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Rate, n: u32) -> CorpusResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = checked(result.checked_mul(factor), "compound factor")?;
    }
    Ok(result)
}

/// Future value of a single amount after `n` periods at `rate` per period.
pub fn fv_lump_sum(present_value: Money, rate: Rate, n: u32) -> CorpusResult<Money> {
    let factor = compound(rate, n)?;
    checked(present_value.checked_mul(factor), "lump-sum future value")
}

/// Future value of an annuity-due: `n` payments of `pmt`, each made at the
/// start of its period.
///
/// FV = pmt * [((1+r)^n - 1) / r] * (1+r)
///
/// With `r == 0` the formula divides by zero, so the value falls back to
/// `pmt * n`.
pub fn fv_annuity_due(pmt: Money, rate: Rate, n: u32) -> CorpusResult<Money> {
    if rate.is_zero() {
        return checked(pmt.checked_mul(Decimal::from(n)), "annuity future value");
    }
    let factor = compound(rate, n)?;
    let annuity_factor = checked(
        (factor - Decimal::ONE).checked_div(rate),
        "annuity factor",
    )?;
    let due = checked(
        annuity_factor.checked_mul(Decimal::ONE + rate),
        "annuity-due adjustment",
    )?;
    checked(pmt.checked_mul(due), "annuity future value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Month-by-month reference: deposit, then grow for the period.
    fn annuity_due_iterative(pmt: Decimal, rate: Decimal, n: u32) -> Decimal {
        let mut balance = Decimal::ZERO;
        for _ in 0..n {
            balance = (balance + pmt) * (Decimal::ONE + rate);
        }
        balance
    }

    #[test]
    fn test_compound_basic() {
        assert_eq!(compound(dec!(0.10), 2).unwrap(), dec!(1.21));
        assert_eq!(compound(dec!(0.05), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_negative_rate() {
        assert_eq!(compound(dec!(-0.5), 3).unwrap(), dec!(0.125));
    }

    #[test]
    fn test_compound_overflow_is_reported() {
        let err = compound(dec!(10), 100).unwrap_err();
        assert!(matches!(err, CorpusError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_fv_lump_sum() {
        let fv = fv_lump_sum(dec!(1000), dec!(0.10), 3).unwrap();
        assert_eq!(fv, dec!(1331));
    }

    #[test]
    fn test_fv_annuity_due_matches_iteration() {
        let rate = dec!(0.06) / dec!(12);
        let closed = fv_annuity_due(dec!(10_000), rate, 120).unwrap();
        let iterative = annuity_due_iterative(dec!(10_000), rate, 120);
        assert!(
            (closed - iterative).abs() < dec!(0.01),
            "closed={closed} iterative={iterative}"
        );
    }

    #[test]
    fn test_fv_annuity_due_zero_rate() {
        let fv = fv_annuity_due(dec!(500), Decimal::ZERO, 24).unwrap();
        assert_eq!(fv, dec!(12_000));
    }

    #[test]
    fn test_fv_annuity_due_negative_rate() {
        let rate = dec!(-0.02) / dec!(12);
        let closed = fv_annuity_due(dec!(1_000), rate, 36).unwrap();
        let iterative = annuity_due_iterative(dec!(1_000), rate, 36);
        assert!((closed - iterative).abs() < dec!(0.01));
        assert!(closed < dec!(36_000));
    }
}
