use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use corpus_core::current_year;
use corpus_core::wealth::sip::{self, WealthConfig};

use crate::input;

/// Arguments for the wealth (SIP) projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct WealthArgs {
    /// Lump sum invested at the start
    #[arg(long, default_value = "0")]
    pub initial_investment: Decimal,

    /// Contribution per month in the first year
    #[arg(long, alias = "sip")]
    pub monthly_contribution: Option<Decimal>,

    /// Total projection length in years
    #[arg(long)]
    pub duration_years: Option<u32>,

    /// Expected annual return in percent
    #[arg(long, alias = "ror")]
    pub annual_return_rate: Option<Decimal>,

    /// Yearly increase of the monthly contribution in percent
    #[arg(long, default_value = "0")]
    pub step_up_rate: Decimal,

    /// Inflation in percent, subtracted from the return
    #[arg(long, default_value = "0")]
    pub inflation_rate: Decimal,

    /// Stop contributing after this many years (0 = never)
    #[arg(long, default_value = "0")]
    pub stop_after_years: u32,

    /// Calendar year of the first row (defaults to the current year)
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_wealth(args: WealthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let from_input = input::config_from::<WealthConfig>(args.input.as_deref())?;
    let config = if let Some(config) = from_input {
        config
    } else {
        WealthConfig {
            initial_investment: args.initial_investment,
            monthly_contribution: args
                .monthly_contribution
                .ok_or("--monthly-contribution is required (or provide --input)")?,
            duration_years: args
                .duration_years
                .ok_or("--duration-years is required (or provide --input)")?,
            annual_return_rate: args
                .annual_return_rate
                .ok_or("--annual-return-rate is required (or provide --input)")?,
            step_up_rate: args.step_up_rate,
            inflation_rate: args.inflation_rate,
            stop_after_years: args.stop_after_years,
            start_year: args.start_year.unwrap_or_else(current_year),
        }
    };

    let result = sip::simulate_wealth(&config)?;
    Ok(serde_json::to_value(result)?)
}
