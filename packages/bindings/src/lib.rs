use napi::Result as NapiResult;
use napi_derive::napi;

use loan_repayment_core::form::LoanApplicationForm;
use loan_repayment_core::options::LoanOptions;
use loan_repayment_core::RepaymentRequest;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Repayment
// ---------------------------------------------------------------------------

/// Repayment for a JSON request, or `null` when the request is unusable.
#[napi]
pub fn compute_repayment(input_json: String) -> NapiResult<Option<String>> {
    match loan_repayment_core::compute_repayment_json(&input_json) {
        Some(result) => serde_json::to_string(&result)
            .map(Some)
            .map_err(to_napi_error),
        None => Ok(None),
    }
}

/// Repayment with methodology, assumptions and warnings; throws with the
/// rejection reason.
#[napi]
pub fn quote_repayment(input_json: String) -> NapiResult<String> {
    let value: serde_json::Value = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    if !value.is_object() {
        return Err(to_napi_error("Repayment request must be a JSON object"));
    }
    let request: RepaymentRequest = serde_json::from_value(value).map_err(to_napi_error)?;
    let output = loan_repayment_core::quote_repayment(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Options and display
// ---------------------------------------------------------------------------

#[napi]
pub fn default_loan_options() -> NapiResult<String> {
    serde_json::to_string(&LoanOptions::default()).map_err(to_napi_error)
}

#[napi]
pub fn format_currency(value: f64) -> String {
    loan_repayment_core::display::format_currency(value)
}

/// The amount-field message for typed text, or `null` when it is acceptable.
#[napi]
pub fn validate_loan_amount(text: String) -> Option<String> {
    let mut form = LoanApplicationForm::new();
    form.handle_amount_input(&text);
    form.amount_error().map(ToString::to_string)
}
