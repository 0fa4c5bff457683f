use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::CorpusError;
use crate::format::periodic_label;
use crate::time_value::{checked, compound, fv_annuity_due, fv_lump_sum};
use crate::types::{
    current_year, percent_to_rate, round_money, with_metadata, ComputationOutput, Money, Percent,
    SimulationResult,
};
use crate::{validate, CorpusResult};

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for the wealth (SIP) projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WealthConfig {
    pub initial_investment: Money,
    /// Contribution per month in the first year.
    pub monthly_contribution: Money,
    pub duration_years: u32,
    /// Nominal annual return.
    pub annual_return_rate: Percent,
    /// Yearly change of the monthly contribution.
    pub step_up_rate: Percent,
    /// Subtracted from the nominal return; all growth is real.
    pub inflation_rate: Percent,
    /// Contributions stop after this many years; 0 means never.
    pub stop_after_years: u32,
    /// Calendar year of the first growth-table row.
    #[serde(default = "current_year")]
    pub start_year: i32,
}

/// One year of the wealth projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthYearRow {
    pub year: i32,
    pub opening: Money,
    pub monthly_contribution: Money,
    /// Display label, e.g. `₹10,000.00 x 12`.
    pub periodic_investment: String,
    /// Cumulative amount put in so far, lump sum included.
    pub self_investment: Money,
    pub growth: Money,
    pub closing: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WealthSummary {
    pub investment: Money,
    pub duration_years: u32,
    pub rate_of_growth: Percent,
    pub real_rate: Percent,
    pub growth: Money,
    pub return_amount: Money,
}

pub type WealthResult = SimulationResult<WealthSummary, WealthYearRow>;

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project wealth year by year at the real (inflation-adjusted) rate.
///
/// Each year's closing value is recomputed in closed form from three parts:
/// the SIP annuity for this year's contribution over all months so far, the
/// lump sum compounded annually, and (once contributions stop) the annuity
/// value frozen at the stop, compounded annually from then on.
pub fn simulate_wealth(config: &WealthConfig) -> CorpusResult<ComputationOutput<WealthResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_wealth_config(config)?;

    let real_rate_pct = config.annual_return_rate - config.inflation_rate;
    let real_annual = percent_to_rate(real_rate_pct);
    let real_monthly = real_annual / dec!(12);
    let step_up = percent_to_rate(config.step_up_rate);
    let stop = config.stop_after_years;

    if real_rate_pct < Decimal::ZERO {
        warnings.push(format!(
            "Inflation ({}%) exceeds the nominal return ({}%); real growth is negative",
            config.inflation_rate, config.annual_return_rate
        ));
    }
    if stop >= config.duration_years {
        debug!(stop, duration = config.duration_years, "contributions run for the whole duration");
    }

    let mut frozen_sip_value = Decimal::ZERO;
    let mut self_investment = config.initial_investment;
    let mut opening = config.initial_investment;
    let mut closing = config.initial_investment;
    let mut growth = Decimal::ZERO;
    let mut growth_table: Vec<WealthYearRow> = Vec::with_capacity(config.duration_years as usize);

    for y in 0..config.duration_years {
        let contributing = stop == 0 || y < stop;
        if !contributing && y == stop {
            debug!(year = config.start_year + y as i32, "contributions stopped");
        }

        let sip_amount = if contributing {
            checked(
                config.monthly_contribution.checked_mul(compound(step_up, y)?),
                "stepped-up contribution",
            )?
        } else {
            Decimal::ZERO
        };

        let fv_sip = fv_annuity_due(sip_amount, real_monthly, (y + 1) * MONTHS_PER_YEAR)?;
        if contributing {
            frozen_sip_value = fv_sip;
        }

        let fv_lump = fv_lump_sum(config.initial_investment, real_annual, y + 1)?;

        let fv_frozen = if contributing {
            Decimal::ZERO
        } else {
            fv_lump_sum(frozen_sip_value, real_annual, y + 1 - stop)?
        };

        closing = checked(
            fv_sip
                .checked_add(fv_lump)
                .and_then(|v| v.checked_add(fv_frozen)),
            "closing balance",
        )?;
        let yearly_contribution = checked(
            sip_amount.checked_mul(Decimal::from(MONTHS_PER_YEAR)),
            "yearly contribution",
        )?;
        self_investment = checked(
            self_investment.checked_add(yearly_contribution),
            "self investment",
        )?;
        growth = checked(closing.checked_sub(self_investment), "wealth growth")?;

        growth_table.push(WealthYearRow {
            year: config.start_year + y as i32,
            opening: round_money(opening),
            monthly_contribution: round_money(sip_amount),
            periodic_investment: periodic_label(sip_amount, MONTHS_PER_YEAR),
            self_investment: round_money(self_investment),
            growth: round_money(growth),
            closing: round_money(closing),
        });

        opening = closing;
    }

    let summary = WealthSummary {
        investment: round_money(self_investment),
        duration_years: config.duration_years,
        rate_of_growth: config.annual_return_rate,
        real_rate: real_rate_pct,
        growth: round_money(growth),
        return_amount: round_money(closing),
    };

    let output = SimulationResult {
        summary,
        growth_table,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Wealth projection (annuity-due SIP with yearly step-up, lump sum at real annual rate)",
        &serde_json::json!({
            "initial_investment": config.initial_investment.to_string(),
            "monthly_contribution": config.monthly_contribution.to_string(),
            "duration_years": config.duration_years,
            "annual_return_rate_pct": config.annual_return_rate.to_string(),
            "inflation_rate_pct": config.inflation_rate.to_string(),
            "real_rate_pct": real_rate_pct.to_string(),
            "step_up_rate_pct": config.step_up_rate.to_string(),
            "stop_after_years": stop,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn validate_wealth_config(config: &WealthConfig) -> CorpusResult<()> {
    validate::non_negative("initial_investment", config.initial_investment)?;
    validate::non_negative("monthly_contribution", config.monthly_contribution)?;
    validate::duration("duration_years", config.duration_years)?;
    validate::above("step_up_rate", config.step_up_rate, dec!(-100))?;
    let real_rate = config
        .annual_return_rate
        .checked_sub(config.inflation_rate)
        .ok_or_else(|| CorpusError::invalid("inflation_rate", "real rate is out of range"))?;
    validate::above("inflation_rate", real_rate, dec!(-100))?;
    validate::calendar_year("start_year", config.start_year)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn default_config() -> WealthConfig {
        WealthConfig {
            initial_investment: dec!(1_000_000),
            monthly_contribution: dec!(10_000),
            duration_years: 10,
            annual_return_rate: dec!(12),
            step_up_rate: dec!(10),
            inflation_rate: dec!(6),
            stop_after_years: 5,
            start_year: 2025,
        }
    }

    #[test]
    fn test_first_year_opening_is_initial_investment() {
        let result = simulate_wealth(&default_config()).unwrap();
        let first = &result.result.growth_table[0];
        assert_eq!(first.year, 2025);
        assert_eq!(first.opening, dec!(1_000_000));
        assert_eq!(first.periodic_investment, "₹10,000.00 x 12");
        assert_eq!(first.self_investment, dec!(1_120_000));
    }

    #[test]
    fn test_openings_chain_from_previous_closing() {
        let result = simulate_wealth(&default_config()).unwrap();
        for pair in result.result.growth_table.windows(2) {
            assert_eq!(pair[1].opening, pair[0].closing);
        }
    }

    #[test]
    fn test_contribution_steps_up() {
        let result = simulate_wealth(&default_config()).unwrap();
        let table = &result.result.growth_table;
        assert_eq!(table[1].monthly_contribution, dec!(11_000));
        assert_eq!(table[4].monthly_contribution, dec!(14_641));
        assert_eq!(table[4].periodic_investment, "₹14,641.00 x 12");
    }

    #[test]
    fn test_first_year_closing_closed_form() {
        let result = simulate_wealth(&default_config()).unwrap();
        let r = dec!(0.06) / dec!(12);
        let sip = fv_annuity_due(dec!(10_000), r, 12).unwrap();
        let expected = round_money(sip + dec!(1_060_000));
        assert_eq!(result.result.growth_table[0].closing, expected);
    }

    #[test]
    fn test_lump_sum_only() {
        let mut config = default_config();
        config.monthly_contribution = Decimal::ZERO;
        config.duration_years = 2;
        let result = simulate_wealth(&config).unwrap();
        // 1_000_000 * 1.06^2
        assert_eq!(result.result.summary.return_amount, dec!(1_123_600));
        assert_eq!(result.result.summary.investment, dec!(1_000_000));
        assert_eq!(result.result.summary.growth, dec!(123_600));
    }

    #[test]
    fn test_zero_real_rate_is_plain_sum() {
        let mut config = default_config();
        config.initial_investment = Decimal::ZERO;
        config.annual_return_rate = dec!(6);
        config.step_up_rate = Decimal::ZERO;
        config.stop_after_years = 0;
        config.duration_years = 3;
        let result = simulate_wealth(&config).unwrap();
        let table = &result.result.growth_table;
        assert_eq!(table[2].closing, dec!(360_000));
        assert_eq!(table[2].growth, Decimal::ZERO);
    }

    #[test]
    fn test_negative_real_rate_warns() {
        let mut config = default_config();
        config.inflation_rate = dec!(15);
        let result = simulate_wealth(&config).unwrap();
        assert_eq!(result.result.summary.real_rate, dec!(-3));
        assert!(result.warnings.iter().any(|w| w.contains("real growth is negative")));
    }

    #[test]
    fn test_contribution_total_overflow_is_an_error() {
        let mut config = default_config();
        config.monthly_contribution = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        config.annual_return_rate = Decimal::ZERO;
        config.inflation_rate = dec!(99);
        config.duration_years = 1;
        let err = simulate_wealth(&config).unwrap_err();
        assert!(matches!(err, crate::CorpusError::FinancialImpossibility(_)), "{err}");
    }

    #[test]
    fn test_start_year_out_of_range_rejected() {
        let mut config = default_config();
        config.start_year = i32::MAX;
        let err = simulate_wealth(&config).unwrap_err();
        assert_eq!(err.field(), Some("start_year"));
    }

    #[test]
    fn test_negative_initial_investment_rejected() {
        let mut config = default_config();
        config.initial_investment = dec!(-1);
        let err = simulate_wealth(&config).unwrap_err();
        assert_eq!(err.field(), Some("initial_investment"));
    }

    #[test]
    fn test_duration_above_cap_rejected() {
        let mut config = default_config();
        config.duration_years = 101;
        let err = simulate_wealth(&config).unwrap_err();
        assert_eq!(err.field(), Some("duration_years"));
    }
}
