//! Loan application form state.
//!
//! Holds what the borrower has entered so far, applies the product limits on
//! the loan amount, and turns a complete form into a repayment request for
//! the engine. Error `Display` strings are the messages shown to the user.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::display::format_currency_decimal;
use crate::options::{LoanOptions, LoanPurpose, LoanTerm, OptionsProvider, RepaymentPeriod};
use crate::repayment::{RepaymentCalculator, RepaymentRequest, RepaymentResult};
use crate::{LoanCalcError, LoanCalcResult};

/// Smallest loan offered.
pub const MIN_LOAN_AMOUNT: Decimal = dec!(1_000);
/// Largest loan offered.
pub const MAX_LOAN_AMOUNT: Decimal = dec!(20_000_000);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Loan amount is required")]
    AmountRequired,

    #[error("Please enter a valid number")]
    AmountNotNumber,

    #[error("Minimum loan amount is {0}")]
    AmountBelowMinimum(String),

    #[error("Maximum loan amount is {0}")]
    AmountAboveMaximum(String),

    #[error("Please complete all fields")]
    Incomplete,

    #[error("Unable to calculate repayment. Please check your inputs.")]
    UnableToCalculate,

    #[error("Failed to load initial data. Please try again later.")]
    OptionsUnavailable,
}

/// A successful calculation together with the frequency it was priced at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentQuote {
    #[serde(flatten)]
    pub result: RepaymentResult,
    pub repayment_period_label: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoanApplicationForm {
    calculator: RepaymentCalculator,
    options: Option<LoanOptions>,
    /// Set when the last catalogue load failed; selections stay unavailable.
    options_failed: bool,
    loan_amount: String,
    purpose: Option<LoanPurpose>,
    period: Option<RepaymentPeriod>,
    term: Option<LoanTerm>,
    amount_error: Option<FormError>,
    calculation_error: Option<FormError>,
}

impl LoanApplicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calculator(calculator: RepaymentCalculator) -> Self {
        Self {
            calculator,
            ..Self::default()
        }
    }

    /// Validate a loan amount against the product limits.
    pub fn check_amount(text: &str) -> Result<Decimal, FormError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FormError::AmountRequired);
        }
        let amount = match Decimal::from_str(text) {
            Ok(amount) => amount,
            // Digit strings too long for Decimal are far above the maximum.
            Err(_) if text.chars().all(|c| c.is_ascii_digit()) => {
                return Err(above_maximum());
            }
            Err(_) => return Err(FormError::AmountNotNumber),
        };
        if amount < MIN_LOAN_AMOUNT {
            return Err(FormError::AmountBelowMinimum(format_currency_decimal(
                MIN_LOAN_AMOUNT,
            )));
        }
        if amount > MAX_LOAN_AMOUNT {
            return Err(above_maximum());
        }
        Ok(amount)
    }

    /// Load the option catalogue, recording a user-facing error on failure.
    pub fn load_options<P: OptionsProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<(), FormError> {
        match provider.load_all() {
            Ok(options) => {
                self.options = Some(options);
                self.options_failed = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load loan options");
                self.options = None;
                self.options_failed = true;
                self.calculation_error = Some(FormError::OptionsUnavailable);
                Err(FormError::OptionsUnavailable)
            }
        }
    }

    pub fn options(&self) -> Option<&LoanOptions> {
        self.options.as_ref()
    }

    /// Accept typed text for the amount: digits only, no leading zeros.
    pub fn handle_amount_input(&mut self, text: &str) {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        self.loan_amount = digits.trim_start_matches('0').to_string();
        self.validate_amount();
    }

    /// Re-check the stored amount; returns whether it is acceptable.
    pub fn validate_amount(&mut self) -> bool {
        match Self::check_amount(&self.loan_amount) {
            Ok(_) => {
                self.amount_error = None;
                true
            }
            Err(e) => {
                self.amount_error = Some(e);
                false
            }
        }
    }

    pub fn loan_amount(&self) -> &str {
        &self.loan_amount
    }

    pub fn amount_error(&self) -> Option<&FormError> {
        self.amount_error.as_ref()
    }

    pub fn calculation_error(&self) -> Option<&FormError> {
        self.calculation_error.as_ref()
    }

    pub fn is_valid_amount(&self) -> bool {
        Self::check_amount(&self.loan_amount).is_ok()
    }

    pub fn select_purpose(&mut self, value: &str) -> LoanCalcResult<()> {
        let purpose = self.catalogue()?.purpose(value)?.clone();
        self.purpose = Some(purpose);
        Ok(())
    }

    pub fn select_period(&mut self, payments_per_year: u32) -> LoanCalcResult<()> {
        let period = self.catalogue()?.period(payments_per_year)?.clone();
        self.period = Some(period);
        Ok(())
    }

    pub fn select_term(&mut self, months: u32) -> LoanCalcResult<()> {
        let term = self.catalogue()?.term(months)?.clone();
        self.term = Some(term);
        Ok(())
    }

    pub fn set_purpose(&mut self, purpose: LoanPurpose) {
        self.purpose = Some(purpose);
    }

    pub fn set_period(&mut self, period: RepaymentPeriod) {
        self.period = Some(period);
    }

    pub fn set_term(&mut self, term: LoanTerm) {
        self.term = Some(term);
    }

    pub fn purpose(&self) -> Option<&LoanPurpose> {
        self.purpose.as_ref()
    }

    pub fn period(&self) -> Option<&RepaymentPeriod> {
        self.period.as_ref()
    }

    pub fn term(&self) -> Option<&LoanTerm> {
        self.term.as_ref()
    }

    /// Whether the calculate action should be enabled.
    pub fn can_calculate(&self) -> bool {
        self.is_valid_amount()
            && self.purpose.is_some()
            && self.period.is_some()
            && self.term.is_some()
    }

    /// Price the current form.
    pub fn calculate(&mut self) -> Result<RepaymentQuote, FormError> {
        let outcome = self.try_calculate();
        self.calculation_error = outcome.as_ref().err().cloned();
        outcome
    }

    /// Clear everything the borrower entered. Loaded options are kept.
    pub fn reset(&mut self) {
        self.loan_amount.clear();
        self.purpose = None;
        self.period = None;
        self.term = None;
        self.amount_error = None;
        self.calculation_error = None;
    }

    fn try_calculate(&self) -> Result<RepaymentQuote, FormError> {
        let (Some(purpose), Some(period), Some(term)) = (&self.purpose, &self.period, &self.term)
        else {
            return Err(FormError::Incomplete);
        };
        let amount = Self::check_amount(&self.loan_amount)?;

        let request = RepaymentRequest::new(
            amount.to_string(),
            purpose.annual_rate,
            period.value,
            term.value,
        );
        let result = self
            .calculator
            .compute(&request)
            .ok_or(FormError::UnableToCalculate)?;

        Ok(RepaymentQuote {
            result,
            repayment_period_label: period.label.clone(),
        })
    }

    /// The loaded catalogue, or the standard one if nothing was ever loaded.
    fn catalogue(&mut self) -> LoanCalcResult<&LoanOptions> {
        if self.options_failed {
            return Err(LoanCalcError::OptionsUnavailable(
                "loan options failed to load".into(),
            ));
        }
        Ok(self.options.get_or_insert_with(LoanOptions::default))
    }
}

fn above_maximum() -> FormError {
    FormError::AmountAboveMaximum(format_currency_decimal(MAX_LOAN_AMOUNT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StaticOptions;

    struct FailingProvider;

    impl OptionsProvider for FailingProvider {
        fn loan_purposes(&self) -> LoanCalcResult<Vec<LoanPurpose>> {
            Err(LoanCalcError::OptionsUnavailable("API Error".into()))
        }
        fn repayment_periods(&self) -> LoanCalcResult<Vec<RepaymentPeriod>> {
            Err(LoanCalcError::OptionsUnavailable("API Error".into()))
        }
        fn loan_terms(&self) -> LoanCalcResult<Vec<LoanTerm>> {
            Err(LoanCalcError::OptionsUnavailable("API Error".into()))
        }
    }

    fn filled_form() -> LoanApplicationForm {
        let mut form = LoanApplicationForm::new();
        form.load_options(&StaticOptions::default()).unwrap();
        form.handle_amount_input("10000");
        form.select_purpose("general").unwrap();
        form.select_period(12).unwrap();
        form.select_term(12).unwrap();
        form
    }

    #[test]
    fn test_amount_sanitising() {
        let mut form = LoanApplicationForm::new();
        form.handle_amount_input("10 000");
        assert_eq!(form.loan_amount(), "10000");
        form.handle_amount_input("00123");
        assert_eq!(form.loan_amount(), "123");
        form.handle_amount_input("abc123def");
        assert_eq!(form.loan_amount(), "123");
    }

    #[test]
    fn test_amount_limits() {
        assert_eq!(
            LoanApplicationForm::check_amount("999").unwrap_err().to_string(),
            "Minimum loan amount is $1,000"
        );
        assert_eq!(
            LoanApplicationForm::check_amount("20000001")
                .unwrap_err()
                .to_string(),
            "Maximum loan amount is $20,000,000"
        );
        assert_eq!(
            LoanApplicationForm::check_amount("1000").unwrap(),
            dec!(1000)
        );
        assert_eq!(
            LoanApplicationForm::check_amount("20000000").unwrap(),
            dec!(20_000_000)
        );
    }

    #[test]
    fn test_amount_required_and_numeric() {
        assert_eq!(
            LoanApplicationForm::check_amount(""),
            Err(FormError::AmountRequired)
        );
        assert_eq!(
            LoanApplicationForm::check_amount("abc"),
            Err(FormError::AmountNotNumber)
        );
        assert!(matches!(
            LoanApplicationForm::check_amount("999999999999999999999999999999999"),
            Err(FormError::AmountAboveMaximum(_))
        ));
    }

    #[test]
    fn test_typing_sets_and_clears_amount_error() {
        let mut form = LoanApplicationForm::new();
        form.handle_amount_input("500");
        assert!(matches!(
            form.amount_error(),
            Some(FormError::AmountBelowMinimum(_))
        ));
        form.handle_amount_input("10000");
        assert_eq!(form.amount_error(), None);
        assert!(form.is_valid_amount());
    }

    #[test]
    fn test_cannot_calculate_until_complete() {
        let mut form = LoanApplicationForm::new();
        assert!(!form.can_calculate());
        form.handle_amount_input("10000");
        form.select_purpose("general").unwrap();
        form.select_period(12).unwrap();
        assert!(!form.can_calculate());
        assert_eq!(form.calculate(), Err(FormError::Incomplete));
        assert_eq!(
            form.calculation_error().map(ToString::to_string).as_deref(),
            Some("Please complete all fields")
        );
    }

    #[test]
    fn test_calculate_carries_period_label() {
        let mut form = filled_form();
        assert!(form.can_calculate());
        let quote = form.calculate().unwrap();
        assert_eq!(quote.repayment_period_label, "Monthly");
        assert_eq!(quote.result.interest_rate, 10.0);
        assert!(quote.result.repayment_per_period > 10_000.0 / 12.0);
        assert_eq!(form.calculation_error(), None);
    }

    #[test]
    fn test_calculate_reports_engine_failure() {
        let mut form = filled_form();
        form.set_purpose(LoanPurpose::new("Broken", "broken", f64::NAN));
        assert_eq!(form.calculate(), Err(FormError::UnableToCalculate));
        assert!(form
            .calculation_error()
            .unwrap()
            .to_string()
            .contains("Unable to calculate"));
    }

    #[test]
    fn test_reset_clears_entries_keeps_options() {
        let mut form = filled_form();
        form.reset();
        assert_eq!(form.loan_amount(), "");
        assert!(form.purpose().is_none());
        assert!(form.period().is_none());
        assert!(form.term().is_none());
        assert!(form.calculation_error().is_none());
        assert!(form.options().is_some());
    }

    #[test]
    fn test_failed_option_load() {
        let mut form = LoanApplicationForm::new();
        assert_eq!(
            form.load_options(&FailingProvider),
            Err(FormError::OptionsUnavailable)
        );
        assert!(form
            .calculation_error()
            .unwrap()
            .to_string()
            .contains("Failed to load initial data"));

        assert!(matches!(
            form.select_purpose("general"),
            Err(LoanCalcError::OptionsUnavailable(_))
        ));
        assert!(form.select_period(12).is_err());
        assert!(form.select_term(12).is_err());
        assert!(form.options().is_none());
        assert!(!form.can_calculate());
    }

    #[test]
    fn test_successful_reload_after_failure() {
        let mut form = LoanApplicationForm::new();
        assert!(form.load_options(&FailingProvider).is_err());
        form.load_options(&StaticOptions::default()).unwrap();
        assert!(form.select_purpose("general").is_ok());
    }

    #[test]
    fn test_unknown_selection() {
        let mut form = filled_form();
        assert!(form.select_term(7).is_err());
        assert_eq!(form.term().unwrap().value, 12);
    }

    #[test]
    fn test_quote_serializes_flat() {
        let quote = filled_form().calculate().unwrap();
        let value = serde_json::to_value(&quote).unwrap();
        assert!(value.get("repaymentPerPeriod").is_some());
        assert_eq!(value["repaymentPeriodLabel"], "Monthly");
    }
}
