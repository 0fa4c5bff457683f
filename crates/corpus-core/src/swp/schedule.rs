use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::{redemption_tax, MONTHS_PER_YEAR};
use crate::error::CorpusError;
use crate::time_value::checked;
use crate::types::{
    percent_to_rate, round_money, with_metadata, ComputationOutput, Money, Percent,
    SimulationResult,
};
use crate::{validate, CorpusResult, MAX_DURATION_YEARS};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

fn default_capital_gains_tax_rate() -> Percent {
    dec!(10)
}

/// Month-level withdrawal plan with tax deducted at source on every payout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpScheduleConfig {
    pub initial_investment: Money,
    pub annual_return_rate: Percent,
    pub holding_years: u32,
    /// Years of withdrawals after the holding period.
    pub swp_years: u32,
    pub monthly_withdrawal: Money,
    pub inflation_rate: Percent,
    /// Tax deducted at source from each withdrawal.
    pub tds_rate: Percent,
    #[serde(default = "default_capital_gains_tax_rate")]
    pub capital_gains_tax_rate: Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulePhase {
    Holding,
    Withdrawal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwpMonthRow {
    pub month: u32,
    pub phase: SchedulePhase,
    pub opening: Money,
    pub swp: Money,
    pub tds: Money,
    pub net_withdrawal: Money,
    pub interest: Money,
    pub closing: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpScheduleSummary {
    pub total_withdrawn: Money,
    pub total_tds: Money,
    pub net_withdrawn: Money,
    pub final_corpus_before_tax: Money,
    pub capital_gain: Money,
    pub capital_gains_tax: Money,
    pub final_corpus_after_tax: Money,
}

pub type SwpScheduleResult = SimulationResult<SwpScheduleSummary, SwpMonthRow>;

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Build the month-by-month schedule: compounding only while holding, then
/// withdraw-then-grow each month with the payout stepped up by inflation at
/// the start of every withdrawal year.
pub fn plan_swp_schedule(
    config: &SwpScheduleConfig,
) -> CorpusResult<ComputationOutput<SwpScheduleResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_schedule_config(config)?;

    let monthly_rate = percent_to_rate(config.annual_return_rate) / dec!(12);
    let inflation = percent_to_rate(config.inflation_rate);
    let tds_rate = percent_to_rate(config.tds_rate);
    let cg_rate = percent_to_rate(config.capital_gains_tax_rate);

    let holding_months = config.holding_years * MONTHS_PER_YEAR;
    let swp_months = config.swp_years * MONTHS_PER_YEAR;

    let mut corpus = config.initial_investment;
    let mut total_withdrawn = Decimal::ZERO;
    let mut total_tds = Decimal::ZERO;
    let mut first_negative_month: Option<u32> = None;
    let mut growth_table: Vec<SwpMonthRow> =
        Vec::with_capacity((holding_months + swp_months) as usize);

    // --- Holding phase ---
    for month in 1..=holding_months {
        let opening = corpus;
        let interest = checked(opening.checked_mul(monthly_rate), "holding interest")?;
        corpus = checked(opening.checked_add(interest), "corpus balance")?;

        growth_table.push(SwpMonthRow {
            month,
            phase: SchedulePhase::Holding,
            opening: round_money(opening),
            swp: Decimal::ZERO,
            tds: Decimal::ZERO,
            net_withdrawal: Decimal::ZERO,
            interest: round_money(interest),
            closing: round_money(corpus),
        });
    }

    debug!(
        months = holding_months,
        corpus = %corpus,
        "holding phase complete"
    );

    // --- Withdrawal phase ---
    let mut swp = config.monthly_withdrawal;
    for m in 0..swp_months {
        if m > 0 && m % MONTHS_PER_YEAR == 0 {
            swp = checked(swp.checked_mul(Decimal::ONE + inflation), "escalated withdrawal")?;
        }
        let month = holding_months + m + 1;
        let opening = corpus;
        let tds = checked(swp.checked_mul(tds_rate), "tax deducted at source")?;
        let net_withdrawal = swp - tds;

        let after_withdrawal = checked(opening.checked_sub(swp), "corpus balance")?;
        let interest = checked(after_withdrawal.checked_mul(monthly_rate), "withdrawal interest")?;
        corpus = checked(after_withdrawal.checked_add(interest), "corpus balance")?;

        total_withdrawn = checked(total_withdrawn.checked_add(swp), "total withdrawal")?;
        total_tds = checked(total_tds.checked_add(tds), "total TDS")?;

        if corpus < Decimal::ZERO && first_negative_month.is_none() {
            first_negative_month = Some(month);
        }

        growth_table.push(SwpMonthRow {
            month,
            phase: SchedulePhase::Withdrawal,
            opening: round_money(opening),
            swp: round_money(swp),
            tds: round_money(tds),
            net_withdrawal: round_money(net_withdrawal),
            interest: round_money(interest),
            closing: round_money(corpus),
        });
    }

    if let Some(month) = first_negative_month {
        warnings.push(format!(
            "Corpus turns negative in month {month}; withdrawals larger than the balance are not capped"
        ));
    }

    let capital_gain = checked(
        corpus.checked_sub(config.initial_investment),
        "capital gain",
    )?;
    let (_, capital_gains_tax) = redemption_tax(capital_gain, cg_rate);
    let after_tax = checked(corpus.checked_sub(capital_gains_tax), "final corpus")?;

    let summary = SwpScheduleSummary {
        total_withdrawn: round_money(total_withdrawn),
        total_tds: round_money(total_tds),
        net_withdrawn: round_money(total_withdrawn - total_tds),
        final_corpus_before_tax: round_money(corpus),
        capital_gain: round_money(capital_gain),
        capital_gains_tax: round_money(capital_gains_tax),
        final_corpus_after_tax: round_money(after_tax),
    };

    let output = SimulationResult {
        summary,
        growth_table,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly SWP schedule (TDS on each withdrawal, flat capital-gains tax on redemption)",
        &serde_json::json!({
            "holding_months": holding_months,
            "swp_months": swp_months,
            "annual_return_rate_pct": config.annual_return_rate.to_string(),
            "inflation_rate_pct": config.inflation_rate.to_string(),
            "tds_rate_pct": config.tds_rate.to_string(),
            "capital_gains_tax_rate_pct": config.capital_gains_tax_rate.to_string(),
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

pub(crate) fn validate_schedule_config(config: &SwpScheduleConfig) -> CorpusResult<()> {
    validate::positive("initial_investment", config.initial_investment)?;
    validate::non_negative("monthly_withdrawal", config.monthly_withdrawal)?;
    validate::duration("swp_years", config.swp_years)?;
    let horizon = config.holding_years.saturating_add(config.swp_years);
    if horizon > MAX_DURATION_YEARS {
        return Err(CorpusError::InvalidConfiguration {
            field: "holding_years".into(),
            reason: format!(
                "holding_years + swp_years must not exceed {MAX_DURATION_YEARS} (got {horizon})"
            ),
        });
    }
    validate::above("inflation_rate", config.inflation_rate, dec!(-100))?;
    validate::within("tds_rate", config.tds_rate, Decimal::ZERO, dec!(100))?;
    validate::within(
        "capital_gains_tax_rate",
        config.capital_gains_tax_rate,
        Decimal::ZERO,
        dec!(100),
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
