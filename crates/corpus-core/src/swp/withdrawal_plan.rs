use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use super::{redemption_tax, MONTHS_PER_YEAR};
use crate::time_value::checked;
use crate::types::{
    current_year, percent_to_rate, round_money, with_metadata, ComputationOutput, Money, Percent,
    SimulationResult,
};
use crate::validate;
use crate::CorpusResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a systematic withdrawal plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpConfig {
    pub initial_investment: Money,
    /// Years the corpus compounds untouched before withdrawals start.
    pub holding_years: u32,
    /// Withdrawal per month in the first withdrawal year.
    pub monthly_withdrawal: Money,
    pub duration_years: u32,
    pub annual_return_rate: Percent,
    /// Yearly escalation of the monthly withdrawal.
    pub inflation_rate: Percent,
    /// Applied to withdrawals and to the final redemption gain.
    pub tax_rate: Percent,
    /// Calendar year of the first growth-table row.
    #[serde(default = "current_year")]
    pub start_year: i32,
}

/// One year of the withdrawal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwpYearRow {
    pub year: i32,
    pub opening: Money,
    pub growth: Money,
    /// Total withdrawn over the twelve months.
    pub withdrawal: Money,
    /// Monthly withdrawal in force this year; zero while holding.
    pub inflated_swp: Money,
    pub tax: Money,
    pub closing: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpSummary {
    pub investment: Money,
    pub duration_years: u32,
    pub rate_of_return: Percent,
    pub profit: Money,
    pub total_withdrawal: Money,
    /// Corpus before the redemption tax.
    pub closing_balance: Money,
    pub capital_gain: Money,
    pub taxable_gain: Money,
    pub tax_swp: Money,
    pub tax_redemption: Money,
    pub final_tax: Money,
    /// Corpus after the redemption tax.
    pub final_corpus: Money,
    pub first_swp: Money,
    pub last_swp: Money,
    pub corpus_end_year: i32,
}

pub type SwpResult = SimulationResult<SwpSummary, SwpYearRow>;

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Simulate a systematic withdrawal plan month by month and report it year
/// by year.
///
/// Each month the balance first earns `annual_return_rate / 12`, then (once
/// the holding period is over) the current withdrawal is taken out. The
/// withdrawal is raised by the inflation rate after every withdrawal year.
/// The balance is never floored at zero.
pub fn simulate_swp(config: &SwpConfig) -> CorpusResult<ComputationOutput<SwpResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_swp_config(config)?;

    let monthly_rate = percent_to_rate(config.annual_return_rate) / dec!(12);
    let inflation = percent_to_rate(config.inflation_rate);
    let tax_rate = percent_to_rate(config.tax_rate);

    if config.holding_years >= config.duration_years {
        warnings.push(format!(
            "Holding period of {} years covers the whole {}-year duration; no withdrawals are made",
            config.holding_years, config.duration_years
        ));
    }

    let mut balance = config.initial_investment;
    let mut withdrawal = config.monthly_withdrawal;
    let mut total_withdrawn = Decimal::ZERO;
    let mut tax_swp = Decimal::ZERO;
    let mut last_swp = Decimal::ZERO;
    let mut depleted_in: Option<i32> = None;
    let mut growth_table: Vec<SwpYearRow> = Vec::with_capacity(config.duration_years as usize);

    for y in 1..=config.duration_years {
        let year = config.start_year + (y - 1) as i32;
        let withdrawing = y > config.holding_years;
        if withdrawing && y == config.holding_years + 1 {
            debug!(year, monthly_withdrawal = %withdrawal, "withdrawal phase begins");
        }

        let opening = balance;
        let mut year_growth = Decimal::ZERO;
        let mut year_withdrawal = Decimal::ZERO;

        for _ in 0..MONTHS_PER_YEAR {
            let growth = checked(balance.checked_mul(monthly_rate), "monthly growth")?;
            balance = checked(balance.checked_add(growth), "corpus balance")?;
            year_growth = checked(year_growth.checked_add(growth), "yearly growth")?;

            if withdrawing {
                balance = checked(balance.checked_sub(withdrawal), "corpus balance")?;
                year_withdrawal =
                    checked(year_withdrawal.checked_add(withdrawal), "yearly withdrawal")?;
                total_withdrawn =
                    checked(total_withdrawn.checked_add(withdrawal), "total withdrawal")?;
            }
        }

        if balance < Decimal::ZERO && depleted_in.is_none() {
            warn!(year, balance = %balance, "corpus depleted");
            depleted_in = Some(year);
        }

        let tax_for_year = checked(year_withdrawal.checked_mul(tax_rate), "withdrawal tax")?;
        tax_swp = checked(tax_swp.checked_add(tax_for_year), "total withdrawal tax")?;

        growth_table.push(SwpYearRow {
            year,
            opening: round_money(opening),
            growth: round_money(year_growth),
            withdrawal: round_money(year_withdrawal),
            inflated_swp: if withdrawing {
                round_money(withdrawal)
            } else {
                Decimal::ZERO
            },
            tax: round_money(tax_for_year),
            closing: round_money(balance),
        });

        if withdrawing {
            last_swp = withdrawal;
            withdrawal = checked(
                withdrawal.checked_mul(Decimal::ONE + inflation),
                "inflation-adjusted withdrawal",
            )?;
        }
    }

    if let Some(year) = depleted_in {
        warnings.push(format!(
            "Corpus turns negative in {year}; withdrawals larger than the balance are not capped"
        ));
    }

    // Final redemption
    let capital_gain = checked(
        balance.checked_sub(config.initial_investment),
        "capital gain",
    )?;
    let (taxable_gain, tax_redemption) = redemption_tax(capital_gain, tax_rate);
    let final_corpus = checked(balance.checked_sub(tax_redemption), "final corpus")?;
    let profit = checked(
        final_corpus
            .checked_add(total_withdrawn)
            .and_then(|v| v.checked_sub(config.initial_investment)),
        "profit",
    )?;
    let final_tax = checked(tax_swp.checked_add(tax_redemption), "total tax")?;

    let summary = SwpSummary {
        investment: round_money(config.initial_investment),
        duration_years: config.duration_years,
        rate_of_return: config.annual_return_rate,
        profit: round_money(profit),
        total_withdrawal: round_money(total_withdrawn),
        closing_balance: round_money(balance),
        capital_gain: round_money(capital_gain),
        taxable_gain: round_money(taxable_gain),
        tax_swp: round_money(tax_swp),
        tax_redemption: round_money(tax_redemption),
        final_tax: round_money(final_tax),
        final_corpus: round_money(final_corpus),
        first_swp: round_money(config.monthly_withdrawal),
        last_swp: round_money(last_swp),
        corpus_end_year: config.start_year + config.duration_years as i32,
    };

    let output = SimulationResult {
        summary,
        growth_table,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Systematic Withdrawal Plan (monthly compounding, inflation-indexed withdrawals, flat LTCG on redemption)",
        &serde_json::json!({
            "initial_investment": config.initial_investment.to_string(),
            "holding_years": config.holding_years,
            "monthly_withdrawal": config.monthly_withdrawal.to_string(),
            "duration_years": config.duration_years,
            "annual_return_rate_pct": config.annual_return_rate.to_string(),
            "inflation_rate_pct": config.inflation_rate.to_string(),
            "tax_rate_pct": config.tax_rate.to_string(),
            "ltcg_exemption": super::LTCG_EXEMPTION.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn validate_swp_config(config: &SwpConfig) -> CorpusResult<()> {
    validate::positive("initial_investment", config.initial_investment)?;
    validate::non_negative("monthly_withdrawal", config.monthly_withdrawal)?;
    validate::duration("duration_years", config.duration_years)?;
    validate::above("inflation_rate", config.inflation_rate, dec!(-100))?;
    validate::within("tax_rate", config.tax_rate, Decimal::ZERO, dec!(100))?;
    validate::calendar_year("start_year", config.start_year)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CorpusError;
    use pretty_assertions::assert_eq;

    fn default_config() -> SwpConfig {
        SwpConfig {
            initial_investment: dec!(10_000_000),
            holding_years: 1,
            monthly_withdrawal: dec!(10_000),
            duration_years: 10,
            annual_return_rate: dec!(10),
            inflation_rate: dec!(10),
            tax_rate: dec!(10),
            start_year: 2025,
        }
    }

    #[test]
    fn test_row_per_year_with_calendar_labels() {
        let result = simulate_swp(&default_config()).unwrap();
        let table = &result.result.growth_table;
        assert_eq!(table.len(), 10);
        assert_eq!(table[0].year, 2025);
        assert_eq!(table[9].year, 2034);
        assert_eq!(result.result.summary.corpus_end_year, 2035);
    }

    #[test]
    fn test_holding_year_has_no_withdrawal() {
        let result = simulate_swp(&default_config()).unwrap();
        let first = &result.result.growth_table[0];
        assert_eq!(first.withdrawal, Decimal::ZERO);
        assert_eq!(first.inflated_swp, Decimal::ZERO);
        assert_eq!(first.tax, Decimal::ZERO);
        assert!(first.growth > Decimal::ZERO);
    }

    #[test]
    fn test_first_withdrawal_year_values() {
        let result = simulate_swp(&default_config()).unwrap();
        let second = &result.result.growth_table[1];
        assert_eq!(second.withdrawal, dec!(120_000));
        assert_eq!(second.inflated_swp, dec!(10_000));
        assert_eq!(second.tax, dec!(12_000));
        assert_eq!(second.opening, result.result.growth_table[0].closing);
    }

    #[test]
    fn test_last_swp_is_final_year_amount() {
        let result = simulate_swp(&default_config()).unwrap();
        let summary = &result.result.summary;
        assert_eq!(summary.first_swp, dec!(10_000));
        // Nine withdrawal years: 10_000 * 1.1^8
        let expected = dec!(10_000) * crate::time_value::compound(dec!(0.1), 8).unwrap();
        assert_eq!(summary.last_swp, round_money(expected));
    }

    #[test]
    fn test_tax_totals_add_up() {
        let result = simulate_swp(&default_config()).unwrap();
        let summary = &result.result.summary;
        let row_tax: Decimal = result.result.growth_table.iter().map(|r| r.tax).sum();
        assert!((summary.tax_swp - row_tax).abs() <= dec!(0.05));
        assert!((summary.final_tax - (summary.tax_swp + summary.tax_redemption)).abs() <= dec!(0.01));
    }

    #[test]
    fn test_holding_covers_duration_warns() {
        let mut config = default_config();
        config.holding_years = 10;
        let result = simulate_swp(&config).unwrap();
        assert_eq!(result.result.summary.total_withdrawal, Decimal::ZERO);
        assert_eq!(result.result.summary.last_swp, Decimal::ZERO);
        assert!(result.warnings.iter().any(|w| w.contains("no withdrawals")));
    }

    #[test]
    fn test_negative_balance_is_not_clamped() {
        let mut config = default_config();
        config.initial_investment = dec!(100_000);
        config.holding_years = 0;
        config.duration_years = 3;
        config.annual_return_rate = Decimal::ZERO;
        config.inflation_rate = Decimal::ZERO;
        let result = simulate_swp(&config).unwrap();
        // 100_000 - 36 * 10_000
        assert_eq!(result.result.summary.closing_balance, dec!(-260_000));
        assert!(result.warnings.iter().any(|w| w.contains("negative in 2025")));
    }

    #[test]
    fn test_withdrawal_totals_overflow_is_an_error() {
        let mut config = default_config();
        config.initial_investment = dec!(1);
        config.holding_years = 0;
        config.monthly_withdrawal = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        config.annual_return_rate = dec!(-1200);
        config.inflation_rate = Decimal::ZERO;
        let err = simulate_swp(&config).unwrap_err();
        assert!(matches!(err, CorpusError::FinancialImpossibility(_)), "{err}");
    }

    #[test]
    fn test_start_year_out_of_range_rejected() {
        let mut config = default_config();
        config.start_year = i32::MAX;
        config.duration_years = 2;
        let err = simulate_swp(&config).unwrap_err();
        assert_eq!(err.field(), Some("start_year"));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut config = default_config();
        config.duration_years = 0;
        let err = simulate_swp(&config).unwrap_err();
        assert_eq!(err.field(), Some("duration_years"));
    }

    #[test]
    fn test_tax_rate_out_of_range_rejected() {
        let mut config = default_config();
        config.tax_rate = dec!(101);
        let err = simulate_swp(&config).unwrap_err();
        assert!(matches!(
            err,
            CorpusError::InvalidConfiguration { ref field, .. } if field == "tax_rate"
        ));
    }

    #[test]
    fn test_non_positive_investment_rejected() {
        let mut config = default_config();
        config.initial_investment = Decimal::ZERO;
        let err = simulate_swp(&config).unwrap_err();
        assert_eq!(err.field(), Some("initial_investment"));
    }
}
