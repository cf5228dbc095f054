use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use loan_repayment_core::options::LoanOptions;

use crate::config::RepayConfig;

/// Which option list to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionKind {
    Purposes,
    Periods,
    Terms,
}

/// Arguments for listing the loan option catalogue
#[derive(Args)]
pub struct OptionsArgs {
    /// Restrict output to one list
    #[arg(long)]
    pub kind: Option<OptionKind>,
}

pub fn run_options(
    args: OptionsArgs,
    config: &RepayConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let options = config.provider()?.load_all()?;
    Ok(Value::Array(option_rows(&options, args.kind)))
}

/// One row per option: `{ kind, label, value, annual_rate }`.
fn option_rows(options: &LoanOptions, kind: Option<OptionKind>) -> Vec<Value> {
    let wanted = |k: OptionKind| kind.map_or(true, |only| only == k);
    let mut rows = Vec::new();

    if wanted(OptionKind::Purposes) {
        rows.extend(options.purposes.iter().map(|p| {
            json!({ "kind": "purpose", "label": p.label, "value": p.value, "annual_rate": p.annual_rate })
        }));
    }
    if wanted(OptionKind::Periods) {
        rows.extend(options.periods.iter().map(|p| {
            json!({ "kind": "period", "label": p.label, "value": p.value, "annual_rate": null })
        }));
    }
    if wanted(OptionKind::Terms) {
        rows.extend(options.terms.iter().map(|t| {
            json!({ "kind": "term", "label": t.label, "value": t.value, "annual_rate": null })
        }));
    }
    rows
}
