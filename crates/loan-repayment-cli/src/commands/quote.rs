use clap::Args;
use serde_json::{json, Value};

use loan_repayment_core::display::{format_currency, format_currency_decimal, format_percentage};
use loan_repayment_core::form::LoanApplicationForm;

use crate::config::RepayConfig;

/// Arguments for a catalogue-based repayment quote
#[derive(Args)]
pub struct QuoteArgs {
    /// Loan amount as typed; anything but digits is ignored ("$25 000" is fine)
    #[arg(long)]
    pub amount: String,

    /// Loan purpose value (see `repay options --kind purposes`)
    #[arg(long)]
    pub purpose: String,

    /// Repayments per year (see `repay options --kind periods`)
    #[arg(long, alias = "frequency")]
    pub period: u32,

    /// Loan term in months (see `repay options --kind terms`)
    #[arg(long)]
    pub term: u32,
}

pub fn run_quote(args: QuoteArgs, config: &RepayConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let provider = config.provider()?;
    let mut form = LoanApplicationForm::with_calculator(config.calculator());
    form.load_options(provider.as_ref())?;

    form.handle_amount_input(&args.amount);
    if let Some(err) = form.amount_error() {
        return Err(err.to_string().into());
    }
    form.select_purpose(&args.purpose)?;
    form.select_period(args.period)?;
    form.select_term(args.term)?;

    let quote = form.calculate()?;
    let amount = LoanApplicationForm::check_amount(form.loan_amount())?;

    Ok(json!({
        "result": {
            "loan_amount": format_currency_decimal(amount),
            "loan_purpose": form.purpose().map(|p| p.label.as_str()).unwrap_or_default(),
            "loan_term": form.term().map(|t| t.label.as_str()).unwrap_or_default(),
            "repayment_period": quote.repayment_period_label,
            "repayment_per_period": format_currency(quote.result.repayment_per_period),
            "repayment_total": format_currency(quote.result.repayment_total),
            "interest_rate": format_percentage(quote.result.interest_rate),
        },
        "quote": quote,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_repayment_core::options::{LoanOptions, LoanPurpose, LoanTerm, RepaymentPeriod};
    use pretty_assertions::assert_eq;

    fn args(amount: &str, purpose: &str, period: u32, term: u32) -> QuoteArgs {
        QuoteArgs {
            amount: amount.into(),
            purpose: purpose.into(),
            period,
            term,
        }
    }

    #[test]
    fn test_quote_against_standard_catalogue() {
        let out = run_quote(args("$30,000", "general", 12, 24), &RepayConfig::default()).unwrap();
        let result = &out["result"];
        assert_eq!(result["loan_amount"], json!("$30,000"));
        assert_eq!(result["loan_purpose"], json!("Day-to-day capital"));
        assert_eq!(result["repayment_period"], json!("Monthly"));
        assert_eq!(result["repayment_per_period"], json!("$1,385"));
        assert_eq!(result["interest_rate"], json!("10%"));
        assert_eq!(out["quote"]["repaymentPeriodLabel"], json!("Monthly"));
    }

    #[test]
    fn test_quote_rejects_amount_out_of_range() {
        let err = run_quote(args("500", "general", 12, 24), &RepayConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Minimum loan amount is $1,000");
    }

    #[test]
    fn test_quote_rejects_unknown_option() {
        let err = run_quote(args("5000", "yacht", 12, 24), &RepayConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown purpose option: yacht");
    }

    #[test]
    fn test_quote_uses_inline_catalogue() {
        let config = RepayConfig {
            options: Some(LoanOptions {
                purposes: vec![LoanPurpose::new("Boat Loan", "boat", 0.0)],
                periods: vec![RepaymentPeriod::new("Quarterly", 4)],
                terms: vec![LoanTerm::new("1 year", 12)],
            }),
            ..RepayConfig::default()
        };
        let out = run_quote(args("4000", "boat", 4, 12), &config).unwrap();
        assert_eq!(out["result"]["repayment_per_period"], json!("$1,000"));
        assert_eq!(out["result"]["repayment_total"], json!("$4,000"));
        assert_eq!(out["result"]["interest_rate"], json!("0%"));
    }
}
