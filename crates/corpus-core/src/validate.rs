use rust_decimal::Decimal;

use crate::error::CorpusError;
use crate::{CorpusResult, MAX_DURATION_YEARS};

const EARLIEST_YEAR: i32 = 1900;
const LATEST_YEAR: i32 = 9999;

pub(crate) fn positive(field: &str, value: Decimal) -> CorpusResult<()> {
    if value <= Decimal::ZERO {
        return Err(CorpusError::invalid(field, format!("must be > 0 (got {value})")));
    }
    Ok(())
}

pub(crate) fn non_negative(field: &str, value: Decimal) -> CorpusResult<()> {
    if value < Decimal::ZERO {
        return Err(CorpusError::invalid(field, format!("cannot be negative (got {value})")));
    }
    Ok(())
}

/// Inclusive range check, used for tax rates in percent.
pub(crate) fn within(field: &str, value: Decimal, low: Decimal, high: Decimal) -> CorpusResult<()> {
    if value < low || value > high {
        return Err(CorpusError::invalid(
            field,
            format!("must be between {low} and {high} (got {value})"),
        ));
    }
    Ok(())
}

/// Strict lower bound, used to keep growth factors like (1 + r) positive.
pub(crate) fn above(field: &str, value: Decimal, floor: Decimal) -> CorpusResult<()> {
    if value <= floor {
        return Err(CorpusError::invalid(
            field,
            format!("must be greater than {floor} (got {value})"),
        ));
    }
    Ok(())
}

pub(crate) fn duration(field: &str, years: u32) -> CorpusResult<()> {
    if years == 0 || years > MAX_DURATION_YEARS {
        return Err(CorpusError::invalid(
            field,
            format!("must be between 1 and {MAX_DURATION_YEARS} years (got {years})"),
        ));
    }
    Ok(())
}

/// Keeps `start_year + duration_years` well inside `i32`.
pub(crate) fn calendar_year(field: &str, year: i32) -> CorpusResult<()> {
    if !(EARLIEST_YEAR..=LATEST_YEAR).contains(&year) {
        return Err(CorpusError::invalid(
            field,
            format!("must be a year between {EARLIEST_YEAR} and {LATEST_YEAR} (got {year})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_calendar_year_bounds() {
        assert!(calendar_year("start_year", 1900).is_ok());
        assert!(calendar_year("start_year", 9999).is_ok());
        assert!(calendar_year("start_year", 1899).is_err());
        let err = calendar_year("start_year", i32::MAX).unwrap_err();
        assert_eq!(err.field(), Some("start_year"));
    }

    #[test]
    fn test_above_is_strict() {
        assert!(above("step_up_rate", dec!(-99.9), dec!(-100)).is_ok());
        assert!(above("step_up_rate", dec!(-100), dec!(-100)).is_err());
    }
}
