use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use corpus_core::current_year;
use corpus_core::swp::schedule::{self, SwpScheduleConfig};
use corpus_core::swp::withdrawal_plan::{self, SwpConfig};

use crate::input;

/// Arguments for a systematic withdrawal plan
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SwpArgs {
    /// Lump sum invested at the start
    #[arg(long)]
    pub initial_investment: Option<Decimal>,

    /// Years the corpus grows untouched before withdrawals begin
    #[arg(long, default_value = "0")]
    pub holding_years: u32,

    /// Withdrawal per month in the first withdrawal year
    #[arg(long)]
    pub monthly_withdrawal: Option<Decimal>,

    /// Total projection length in years
    #[arg(long)]
    pub duration_years: Option<u32>,

    /// Expected annual return in percent (e.g. 10 for 10%)
    #[arg(long, alias = "ror")]
    pub annual_return_rate: Option<Decimal>,

    /// Yearly escalation of the withdrawal in percent
    #[arg(long, default_value = "0")]
    pub inflation_rate: Decimal,

    /// Tax on withdrawals and redemption gain in percent
    #[arg(long, default_value = "0")]
    pub tax_rate: Decimal,

    /// Calendar year of the first row (defaults to the current year)
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the monthly withdrawal schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SwpScheduleArgs {
    /// Lump sum invested at the start
    #[arg(long)]
    pub initial_investment: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long, alias = "ror")]
    pub annual_return_rate: Option<Decimal>,

    /// Years of compounding before withdrawals begin
    #[arg(long, default_value = "0")]
    pub holding_years: u32,

    /// Years of monthly withdrawals
    #[arg(long)]
    pub swp_years: Option<u32>,

    /// Withdrawal per month in the first withdrawal year
    #[arg(long)]
    pub monthly_withdrawal: Option<Decimal>,

    /// Yearly escalation of the withdrawal in percent
    #[arg(long, default_value = "0")]
    pub inflation_rate: Decimal,

    /// Tax deducted at source from each withdrawal, in percent
    #[arg(long, default_value = "0")]
    pub tds_rate: Decimal,

    /// Tax on the final capital gain above the exemption, in percent
    #[arg(long)]
    pub capital_gains_tax_rate: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_swp(args: SwpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let from_input = input::config_from::<SwpConfig>(args.input.as_deref())?;
    let config = if let Some(config) = from_input {
        config
    } else {
        SwpConfig {
            initial_investment: args
                .initial_investment
                .ok_or("--initial-investment is required (or provide --input)")?,
            holding_years: args.holding_years,
            monthly_withdrawal: args
                .monthly_withdrawal
                .ok_or("--monthly-withdrawal is required (or provide --input)")?,
            duration_years: args
                .duration_years
                .ok_or("--duration-years is required (or provide --input)")?,
            annual_return_rate: args
                .annual_return_rate
                .ok_or("--annual-return-rate is required (or provide --input)")?,
            inflation_rate: args.inflation_rate,
            tax_rate: args.tax_rate,
            start_year: args.start_year.unwrap_or_else(current_year),
        }
    };

    let result = withdrawal_plan::simulate_swp(&config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_swp_schedule(args: SwpScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let from_input = input::config_from::<SwpScheduleConfig>(args.input.as_deref())?;
    let config = if let Some(config) = from_input {
        config
    } else {
        SwpScheduleConfig {
            initial_investment: args
                .initial_investment
                .ok_or("--initial-investment is required (or provide --input)")?,
            annual_return_rate: args
                .annual_return_rate
                .ok_or("--annual-return-rate is required (or provide --input)")?,
            holding_years: args.holding_years,
            swp_years: args
                .swp_years
                .ok_or("--swp-years is required (or provide --input)")?,
            monthly_withdrawal: args
                .monthly_withdrawal
                .ok_or("--monthly-withdrawal is required (or provide --input)")?,
            inflation_rate: args.inflation_rate,
            tds_rate: args.tds_rate,
            capital_gains_tax_rate: args.capital_gains_tax_rate.unwrap_or(dec!(10)),
        }
    };

    let result = schedule::plan_swp_schedule(&config)?;
    Ok(serde_json::to_value(result)?)
}
