use clap::Args;
use serde_json::Value;

use loan_repayment_core::{RawValue, RepaymentRequest};

use crate::config::RepayConfig;
use crate::input;

/// Arguments for a raw repayment calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CalculateArgs {
    /// Path to JSON request file (flags override its fields)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub amount: Option<String>,

    /// Annual interest rate as a decimal (0.1 = 10%)
    #[arg(long, alias = "annual-rate")]
    pub rate: Option<String>,

    /// Number of repayments per year (12 = monthly)
    #[arg(long, alias = "frequency")]
    pub payments_per_year: Option<String>,

    /// Loan term in months
    #[arg(long, alias = "total-months")]
    pub term_months: Option<String>,
}

impl CalculateArgs {
    fn has_flags(&self) -> bool {
        self.amount.is_some()
            || self.rate.is_some()
            || self.payments_per_year.is_some()
            || self.term_months.is_some()
    }
}

pub fn run_calculate(
    args: CalculateArgs,
    config: &RepayConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request = if let Some(ref path) = args.input {
        request_from_value(input::file::read_json(path)?)?
    } else if args.has_flags() {
        RepaymentRequest::default()
    } else if let Some(data) = input::stdin::read_stdin()? {
        request_from_value(data)?
    } else {
        return Err(
            "--amount, --rate, --payments-per-year and --term-months are required \
             (or provide --input / stdin)"
                .into(),
        );
    };

    override_field(&mut request.amount, args.amount);
    override_field(&mut request.annual_rate, args.rate);
    override_field(&mut request.payments_per_year, args.payments_per_year);
    override_field(&mut request.total_months, args.term_months);

    let output = config
        .calculator()
        .quote(&request)
        .map_err(|e| format!("Unable to calculate repayment: {e}"))?;
    Ok(serde_json::to_value(output)?)
}

fn override_field(field: &mut RawValue, flag: Option<String>) {
    if let Some(text) = flag {
        *field = RawValue::from(text);
    }
}

fn request_from_value(value: Value) -> Result<RepaymentRequest, Box<dyn std::error::Error>> {
    if !value.is_object() {
        return Err("Unable to calculate repayment: request must be a JSON object".into());
    }
    serde_json::from_value(value)
        .map_err(|e| format!("Unable to calculate repayment: {e}").into())
}
