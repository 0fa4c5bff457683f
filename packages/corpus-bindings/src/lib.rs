use napi::Result as NapiResult;
use napi_derive::napi;

use corpus_core::form::{SwpForm, SwpScheduleForm, WealthForm};
use corpus_core::swp::schedule::{self, SwpScheduleConfig};
use corpus_core::swp::withdrawal_plan::{self, SwpConfig};
use corpus_core::wealth::sip::{self, WealthConfig};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Systematic withdrawal plan
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_swp(config_json: String) -> NapiResult<String> {
    let config: SwpConfig = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let output = withdrawal_plan::simulate_swp(&config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn plan_swp_schedule(config_json: String) -> NapiResult<String> {
    let config: SwpScheduleConfig = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let output = schedule::plan_swp_schedule(&config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Raw calculator form (every field a string) straight from the page.
#[napi]
pub fn simulate_swp_form(form_json: String) -> NapiResult<String> {
    let form: SwpForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let config = SwpConfig::try_from(&form).map_err(to_napi_error)?;
    let output = withdrawal_plan::simulate_swp(&config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn plan_swp_schedule_form(form_json: String) -> NapiResult<String> {
    let form: SwpScheduleForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let config = SwpScheduleConfig::try_from(&form).map_err(to_napi_error)?;
    let output = schedule::plan_swp_schedule(&config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Wealth
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_wealth(config_json: String) -> NapiResult<String> {
    let config: WealthConfig = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let output = sip::simulate_wealth(&config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate_wealth_form(form_json: String) -> NapiResult<String> {
    let form: WealthForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let config = WealthConfig::try_from(&form).map_err(to_napi_error)?;
    let output = sip::simulate_wealth(&config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Format a decimal string as rupees with Indian digit grouping.
#[napi]
pub fn format_inr(amount: String) -> NapiResult<String> {
    let value = corpus_core::form::parse_amount("amount", &amount).map_err(to_napi_error)?;
    Ok(corpus_core::format::format_inr(value))
}
