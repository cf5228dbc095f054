//! Raw repayment inputs as they arrive from a form or a JSON payload.
//!
//! Every field may be a number, a numeric string, or absent. Coercion happens
//! in the engine, never at deserialisation time, so a malformed field still
//! yields a request that the engine can reject.

use serde::{Deserialize, Serialize};

/// A user-entered value that has not yet been coerced to a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawValue {
    /// Coerce to a finite `f64`.
    ///
    /// Strings are trimmed and parsed; blank strings, unparsable text,
    /// missing values, NaN and infinities all coerce to `None`.
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            RawValue::Missing => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Missing)
    }
}

/// The four raw inputs of a repayment calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentRequest {
    /// Principal borrowed.
    #[serde(default)]
    pub amount: RawValue,
    /// Annual rate as a decimal fraction (0.1 = 10%).
    #[serde(default, alias = "annual_rate")]
    pub annual_rate: RawValue,
    /// Number of repayments per year (52 weekly, 26 fortnightly, 12 monthly).
    #[serde(default, alias = "payments_per_year")]
    pub payments_per_year: RawValue,
    /// Loan term in months.
    #[serde(default, alias = "total_months")]
    pub total_months: RawValue,
}

impl RepaymentRequest {
    pub fn new(
        amount: impl Into<RawValue>,
        annual_rate: impl Into<RawValue>,
        payments_per_year: impl Into<RawValue>,
        total_months: impl Into<RawValue>,
    ) -> Self {
        Self {
            amount: amount.into(),
            annual_rate: annual_rate.into(),
            payments_per_year: payments_per_year.into(),
            total_months: total_months.into(),
        }
    }
}
