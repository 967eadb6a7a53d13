use napi::Result as NapiResult;
use napi_derive::napi;

use amortize_core::schedule::FlexiblePaymentInput;
use amortize_core::LoanTerms;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_terms(input_json: &str) -> NapiResult<LoanTerms> {
    let terms: LoanTerms = serde_json::from_str(input_json).map_err(to_napi_error)?;
    terms.validate().map_err(to_napi_error)?;
    Ok(terms)
}

// ---------------------------------------------------------------------------
// Amortization engine
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let payment = amortize_core::calculate_payment(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&payment).map_err(to_napi_error)
}

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = amortize_core::generate_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn generate_schedule_with_payment(input_json: String) -> NapiResult<String> {
    let input: FlexiblePaymentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortize_core::generate_schedule_with_payment(&input.terms, input.fixed_payment)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_comparison_scenarios(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = amortize_core::calculate_comparison_scenarios(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = amortize_core::analysis::analyze_loan(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
