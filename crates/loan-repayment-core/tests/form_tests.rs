use loan_repayment_core::display::{format_currency, format_percentage};
use loan_repayment_core::form::{FormError, LoanApplicationForm};
use loan_repayment_core::options::{
    LoanOptions, LoanPurpose, LoanTerm, RepaymentPeriod, StaticOptions,
};
use loan_repayment_core::{compute_repayment, RepaymentRequest};
use pretty_assertions::assert_eq;

fn custom_catalogue() -> LoanOptions {
    LoanOptions {
        purposes: vec![
            LoanPurpose::new("Personal Loan", "personal", 0.055),
            LoanPurpose::new("Business Loan", "business", 0.065),
        ],
        periods: vec![
            RepaymentPeriod::new("Monthly", 12),
            RepaymentPeriod::new("Quarterly", 4),
        ],
        terms: vec![
            LoanTerm::new("1 year", 12),
            LoanTerm::new("2 years", 24),
            LoanTerm::new("5 years", 60),
        ],
    }
}

#[test]
fn test_form_quote_matches_direct_engine_call() {
    let mut form = LoanApplicationForm::new();
    form.load_options(&StaticOptions::new(custom_catalogue()))
        .unwrap();
    form.handle_amount_input("$25 000");
    form.select_purpose("business").unwrap();
    form.select_period(4).unwrap();
    form.select_term(60).unwrap();

    let quote = form.calculate().unwrap();
    let direct = compute_repayment(&RepaymentRequest::new(25_000.0, 0.065, 4u32, 60u32)).unwrap();

    assert_eq!(quote.result, direct);
    assert_eq!(quote.repayment_period_label, "Quarterly");
    assert_eq!(format_percentage(quote.result.interest_rate), "6.5%");
}

#[test]
fn test_catalogue_options_are_enforced() {
    let mut form = LoanApplicationForm::new();
    form.load_options(&StaticOptions::new(custom_catalogue()))
        .unwrap();
    // Weekly is in the standard catalogue but not in this one
    assert!(form.select_period(52).is_err());
    assert!(form.select_purpose("general").is_err());
}

#[test]
fn test_display_of_a_weekly_property_loan() {
    let mut form = LoanApplicationForm::new();
    form.handle_amount_input("500000");
    form.select_purpose("property").unwrap();
    form.select_period(52).unwrap();
    form.select_term(240).unwrap();

    let quote = form.calculate().unwrap();
    let per_period = format_currency(quote.result.repayment_per_period);
    let total = format_currency(quote.result.repayment_total);

    assert!(per_period.starts_with('$'));
    assert!(total.contains(','));
    assert_eq!(format_percentage(quote.result.interest_rate), "2.9%");
    assert_eq!(quote.repayment_period_label, "Weekly");
}

#[test]
fn test_amount_out_of_range_blocks_calculation() {
    let mut form = LoanApplicationForm::new();
    form.select_purpose("general").unwrap();
    form.select_period(12).unwrap();
    form.select_term(12).unwrap();

    form.handle_amount_input("999");
    assert!(!form.can_calculate());
    assert!(matches!(
        form.calculate(),
        Err(FormError::AmountBelowMinimum(_))
    ));

    form.handle_amount_input("20000001");
    assert_eq!(
        form.amount_error().map(ToString::to_string),
        Some("Maximum loan amount is $20,000,000".to_string())
    );
}
