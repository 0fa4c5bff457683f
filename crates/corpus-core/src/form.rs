//! Parse-and-validate for calculator forms.
//!
//! Browsers hand over every field as a string. Each form type here converts
//! into its engine config via `TryFrom`, rejecting blanks, non-numbers and
//! non-finite values by field name, then running the engine's own range
//! checks. Nothing is coerced or clamped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CorpusError;
use crate::types::current_year;
use crate::CorpusResult;

#[cfg(feature = "swp")]
use crate::swp::schedule::{validate_schedule_config, SwpScheduleConfig};
#[cfg(feature = "swp")]
use crate::swp::withdrawal_plan::{validate_swp_config, SwpConfig};
#[cfg(feature = "wealth")]
use crate::wealth::sip::{validate_wealth_config, WealthConfig};

/// Raw SWP calculator fields.
#[cfg(feature = "swp")]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwpForm {
    pub initial_investment: String,
    pub holding_years: String,
    pub monthly_withdrawal: String,
    pub duration_years: String,
    pub annual_return_rate: String,
    pub inflation_rate: String,
    pub tax_rate: String,
    /// Blank means the current year.
    #[serde(default)]
    pub start_year: String,
}

/// Raw monthly-schedule fields.
#[cfg(feature = "swp")]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwpScheduleForm {
    pub initial_investment: String,
    pub annual_return_rate: String,
    pub holding_years: String,
    pub swp_years: String,
    pub monthly_withdrawal: String,
    pub inflation_rate: String,
    pub tds_rate: String,
    /// Blank means 10%.
    #[serde(default)]
    pub capital_gains_tax_rate: String,
}

/// Raw wealth calculator fields.
#[cfg(feature = "wealth")]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WealthForm {
    pub initial_investment: String,
    pub monthly_contribution: String,
    pub duration_years: String,
    pub annual_return_rate: String,
    pub step_up_rate: String,
    pub inflation_rate: String,
    pub stop_after_years: String,
    #[serde(default)]
    pub start_year: String,
}

#[cfg(feature = "swp")]
impl TryFrom<&SwpForm> for SwpConfig {
    type Error = CorpusError;

    fn try_from(form: &SwpForm) -> CorpusResult<Self> {
        let config = SwpConfig {
            initial_investment: parse_amount("initial_investment", &form.initial_investment)?,
            holding_years: parse_years("holding_years", &form.holding_years)?,
            monthly_withdrawal: parse_amount("monthly_withdrawal", &form.monthly_withdrawal)?,
            duration_years: parse_years("duration_years", &form.duration_years)?,
            annual_return_rate: parse_amount("annual_return_rate", &form.annual_return_rate)?,
            inflation_rate: parse_amount("inflation_rate", &form.inflation_rate)?,
            tax_rate: parse_amount("tax_rate", &form.tax_rate)?,
            start_year: parse_start_year(&form.start_year)?,
        };
        validate_swp_config(&config)?;
        Ok(config)
    }
}

#[cfg(feature = "swp")]
impl TryFrom<&SwpScheduleForm> for SwpScheduleConfig {
    type Error = CorpusError;

    fn try_from(form: &SwpScheduleForm) -> CorpusResult<Self> {
        let capital_gains_tax_rate = if form.capital_gains_tax_rate.trim().is_empty() {
            rust_decimal_macros::dec!(10)
        } else {
            parse_amount("capital_gains_tax_rate", &form.capital_gains_tax_rate)?
        };
        let config = SwpScheduleConfig {
            initial_investment: parse_amount("initial_investment", &form.initial_investment)?,
            annual_return_rate: parse_amount("annual_return_rate", &form.annual_return_rate)?,
            holding_years: parse_years("holding_years", &form.holding_years)?,
            swp_years: parse_years("swp_years", &form.swp_years)?,
            monthly_withdrawal: parse_amount("monthly_withdrawal", &form.monthly_withdrawal)?,
            inflation_rate: parse_amount("inflation_rate", &form.inflation_rate)?,
            tds_rate: parse_amount("tds_rate", &form.tds_rate)?,
            capital_gains_tax_rate,
        };
        validate_schedule_config(&config)?;
        Ok(config)
    }
}

#[cfg(feature = "wealth")]
impl TryFrom<&WealthForm> for WealthConfig {
    type Error = CorpusError;

    fn try_from(form: &WealthForm) -> CorpusResult<Self> {
        let config = WealthConfig {
            initial_investment: parse_amount("initial_investment", &form.initial_investment)?,
            monthly_contribution: parse_amount(
                "monthly_contribution",
                &form.monthly_contribution,
            )?,
            duration_years: parse_years("duration_years", &form.duration_years)?,
            annual_return_rate: parse_amount("annual_return_rate", &form.annual_return_rate)?,
            step_up_rate: parse_amount("step_up_rate", &form.step_up_rate)?,
            inflation_rate: parse_amount("inflation_rate", &form.inflation_rate)?,
            stop_after_years: parse_years("stop_after_years", &form.stop_after_years)?,
            start_year: parse_start_year(&form.start_year)?,
        };
        validate_wealth_config(&config)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Parse a decimal amount or percentage. Accepts plain and scientific
/// notation; rejects blanks, `NaN` and infinities.
pub fn parse_amount(field: &str, raw: &str) -> CorpusResult<Decimal> {
    let text = required(field, raw)?;
    let lowered = text.to_ascii_lowercase();
    let unsigned = lowered.trim_start_matches(|c: char| c == '+' || c == '-');
    if unsigned.starts_with("inf") || unsigned == "nan" {
        return Err(CorpusError::invalid(
            field,
            format!("must be a finite number (got '{text}')"),
        ));
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| CorpusError::invalid(field, format!("must be a number (got '{text}')")))
}

/// Parse a count of years: a non-negative whole number.
pub fn parse_years(field: &str, raw: &str) -> CorpusResult<u32> {
    let text = required(field, raw)?;
    text.parse::<u32>().map_err(|_| {
        CorpusError::invalid(
            field,
            format!("must be a non-negative whole number of years (got '{text}')"),
        )
    })
}

fn parse_start_year(raw: &str) -> CorpusResult<i32> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(current_year());
    }
    text.parse::<i32>().map_err(|_| {
        CorpusError::invalid("start_year", format!("must be a calendar year (got '{text}')"))
    })
}

fn required<'a>(field: &str, raw: &'a str) -> CorpusResult<&'a str> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(CorpusError::invalid(field, "is required"));
    }
    Ok(text)
}
