//! Level-payment repayment engine.
//!
//! A request is coerced, range-checked, converted into a period count and a
//! periodic rate, and priced as an ordinary annuity. Every failure, whether
//! a bad input or a non-finite intermediate, is reported as a
//! [`LoanCalcError`] by the `try_*` entry points and collapses to `None` in
//! the public `compute*` contract.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::input::{RawValue, RepaymentRequest};
use crate::error::LoanCalcError;
use crate::time_value::{pmt, PaymentTiming};
use crate::types::{with_metadata, Amount, ComputationOutput, Rate};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest accepted per-period rate (as a decimal fraction).
pub const DEFAULT_MAX_PERIODIC_RATE: f64 = 1_000_000.0;
/// Largest accepted number of repayment periods.
pub const DEFAULT_MAX_PERIODS: f64 = 1_000_000.0;

const MONTHS_PER_YEAR: f64 = 12.0;
const PERCENT: f64 = 100.0;
const INTEREST_RATE_DP: u32 = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Magnitude caps that keep the annuity formula away from overflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardLimits {
    pub max_periodic_rate: f64,
    pub max_periods: f64,
}

impl Default for GuardLimits {
    fn default() -> Self {
        Self {
            max_periodic_rate: DEFAULT_MAX_PERIODIC_RATE,
            max_periods: DEFAULT_MAX_PERIODS,
        }
    }
}

/// Outcome of a successful repayment calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentResult {
    /// Level payment per period, as a positive magnitude. Not rounded.
    pub repayment_per_period: Amount,
    /// `repayment_per_period * nper`.
    pub repayment_total: Amount,
    /// Annual rate as a percentage, rounded to 2 decimal places.
    pub interest_rate: f64,
}

/// Stateless calculator carrying its guard configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RepaymentCalculator {
    limits: GuardLimits,
}

/// Intermediate values kept for the computation envelope.
#[derive(Debug, Clone, Copy)]
struct Evaluation {
    amount: Amount,
    annual_rate: Rate,
    payments_per_year: f64,
    total_months: f64,
    exact_periods: f64,
    nper: f64,
    periodic_rate: Rate,
    result: RepaymentResult,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl RepaymentCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: GuardLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> GuardLimits {
        self.limits
    }

    /// Compute a repayment, or `None` when the request cannot be priced.
    pub fn compute(&self, request: &RepaymentRequest) -> Option<RepaymentResult> {
        match self.try_compute(request) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::debug!(error = %e, "repayment calculation rejected");
                None
            }
        }
    }

    /// Compute a repayment, reporting why a request was rejected.
    pub fn try_compute(&self, request: &RepaymentRequest) -> LoanCalcResult<RepaymentResult> {
        self.evaluate(request).map(|e| e.result)
    }

    /// Compute a repayment from an arbitrary JSON value.
    ///
    /// Anything other than an object carrying the four fields yields `None`.
    pub fn compute_value(&self, value: &serde_json::Value) -> Option<RepaymentResult> {
        if !value.is_object() {
            tracing::debug!("repayment request is not a JSON object");
            return None;
        }
        match serde_json::from_value::<RepaymentRequest>(value.clone()) {
            Ok(request) => self.compute(&request),
            Err(e) => {
                tracing::debug!(error = %e, "repayment request could not be decoded");
                None
            }
        }
    }

    /// Compute a repayment and wrap it in the standard output envelope.
    pub fn quote(
        &self,
        request: &RepaymentRequest,
    ) -> LoanCalcResult<ComputationOutput<RepaymentResult>> {
        let start = Instant::now();
        let eval = self.evaluate(request)?;

        let mut warnings: Vec<String> = Vec::new();
        if eval.periodic_rate == 0.0 {
            warnings.push(
                "Zero interest rate: each repayment is an equal share of the principal".into(),
            );
        }
        if eval.exact_periods != eval.nper {
            warnings.push(format!(
                "{} payments per year over {} months is {} periods; rounded to {}",
                eval.payments_per_year, eval.total_months, eval.exact_periods, eval.nper
            ));
        }

        let elapsed = start.elapsed().as_micros() as u64;
        Ok(with_metadata(
            "Ordinary annuity — level repayment per period",
            &serde_json::json!({
                "amount": eval.amount,
                "annual_rate": eval.annual_rate,
                "payments_per_year": eval.payments_per_year,
                "total_months": eval.total_months,
                "nper": eval.nper,
                "periodic_rate": eval.periodic_rate,
            }),
            warnings,
            elapsed,
            eval.result,
        ))
    }

    fn evaluate(&self, request: &RepaymentRequest) -> LoanCalcResult<Evaluation> {
        let amount = coerce_field("amount", &request.amount)?;
        let annual_rate = coerce_field("annualRate", &request.annual_rate)?;
        let payments_per_year = coerce_field("paymentsPerYear", &request.payments_per_year)?;
        let total_months = coerce_field("totalMonths", &request.total_months)?;

        require_positive("amount", amount)?;
        require_positive("paymentsPerYear", payments_per_year)?;
        require_positive("totalMonths", total_months)?;
        if annual_rate < 0.0 {
            return Err(LoanCalcError::invalid("annualRate", "Must be >= 0"));
        }

        let years = total_months / MONTHS_PER_YEAR;
        let exact_periods = payments_per_year * years;
        let nper = exact_periods.round();
        if !nper.is_finite() || nper <= 0.0 {
            return Err(LoanCalcError::invalid(
                "totalMonths",
                format!("Term yields no whole repayment periods (nper = {nper})"),
            ));
        }

        let periodic_rate = annual_rate / payments_per_year;
        if !periodic_rate.is_finite() {
            return Err(LoanCalcError::arithmetic("periodic rate"));
        }
        if periodic_rate.abs() > self.limits.max_periodic_rate {
            return Err(LoanCalcError::arithmetic(format!(
                "periodic rate guard ({periodic_rate} exceeds {})",
                self.limits.max_periodic_rate
            )));
        }
        if nper > self.limits.max_periods {
            return Err(LoanCalcError::arithmetic(format!(
                "period count guard ({nper} exceeds {})",
                self.limits.max_periods
            )));
        }

        // A periodic rate too small to move 1 + r prices as interest-free.
        let repayment_per_period =
            pmt(periodic_rate, nper, amount, 0.0, PaymentTiming::End)?.abs();

        let repayment_total = repayment_per_period * nper;
        if !repayment_total.is_finite() {
            return Err(LoanCalcError::arithmetic("total repayment"));
        }

        let interest_rate = rate_as_percentage(annual_rate)?;

        Ok(Evaluation {
            amount,
            annual_rate,
            payments_per_year,
            total_months,
            exact_periods,
            nper,
            periodic_rate,
            result: RepaymentResult {
                repayment_per_period,
                repayment_total,
                interest_rate,
            },
        })
    }
}

/// Compute a repayment with the default guard limits.
pub fn compute_repayment(request: &RepaymentRequest) -> Option<RepaymentResult> {
    RepaymentCalculator::new().compute(request)
}

/// Like [`compute_repayment`], but reports the rejection reason.
pub fn try_compute_repayment(request: &RepaymentRequest) -> LoanCalcResult<RepaymentResult> {
    RepaymentCalculator::new().try_compute(request)
}

/// Compute a repayment from an untyped JSON value with the default limits.
pub fn compute_repayment_value(value: &serde_json::Value) -> Option<RepaymentResult> {
    RepaymentCalculator::new().compute_value(value)
}

/// Compute a repayment from a JSON document; unparsable text yields `None`.
pub fn compute_repayment_json(input: &str) -> Option<RepaymentResult> {
    let value: serde_json::Value = serde_json::from_str(input).ok()?;
    compute_repayment_value(&value)
}

/// Compute a repayment wrapped in the standard output envelope.
pub fn quote_repayment(
    request: &RepaymentRequest,
) -> LoanCalcResult<ComputationOutput<RepaymentResult>> {
    RepaymentCalculator::new().quote(request)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn coerce_field(field: &str, raw: &RawValue) -> LoanCalcResult<f64> {
    raw.coerce().ok_or_else(|| {
        let reason = match raw {
            RawValue::Missing => "Value is required".to_string(),
            RawValue::Text(s) => format!("'{s}' is not a finite number"),
            RawValue::Number(n) => format!("{n} is not a finite number"),
        };
        LoanCalcError::invalid(field, reason)
    })
}

fn require_positive(field: &str, value: f64) -> LoanCalcResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(LoanCalcError::invalid(field, "Must be > 0"))
    }
}

/// `rate * 100`, rounded half away from zero to 2 decimal places.
///
/// Values beyond the range of `Decimal` are returned unrounded; at that
/// magnitude the two decimals are below f64 resolution anyway.
fn rate_as_percentage(rate: Rate) -> LoanCalcResult<f64> {
    let pct = rate * PERCENT;
    if !pct.is_finite() {
        return Err(LoanCalcError::arithmetic("interest rate percentage"));
    }
    Ok(Decimal::from_f64(pct)
        .map(|d| d.round_dp_with_strategy(INTEREST_RATE_DP, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(pct))
}
