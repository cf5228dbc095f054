//! Loan option catalogue: purposes (each carrying its annual rate), repayment
//! frequencies, and terms. The calculator never depends on where these come
//! from; [`OptionsProvider`] is the seam for static, file-backed, or remote
//! sources.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

use crate::error::LoanCalcError;
use crate::types::Rate;
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Option records
// ---------------------------------------------------------------------------

/// What the loan is for, and the annual rate that applies to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPurpose {
    pub label: String,
    pub value: String,
    /// Annual rate as a decimal fraction (0.045 = 4.5%).
    #[serde(alias = "annual_rate")]
    pub annual_rate: Rate,
}

/// Repayment frequency; `value` is the number of payments per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentPeriod {
    pub label: String,
    pub value: u32,
}

/// Loan term; `value` is the length in months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerm {
    pub label: String,
    pub value: u32,
}

impl LoanPurpose {
    pub fn new(label: &str, value: &str, annual_rate: Rate) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            annual_rate,
        }
    }
}

impl RepaymentPeriod {
    pub fn new(label: &str, payments_per_year: u32) -> Self {
        Self {
            label: label.into(),
            value: payments_per_year,
        }
    }
}

impl LoanTerm {
    pub fn new(label: &str, months: u32) -> Self {
        Self {
            label: label.into(),
            value: months,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// The three option lists offered to a borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOptions {
    pub purposes: Vec<LoanPurpose>,
    pub periods: Vec<RepaymentPeriod>,
    pub terms: Vec<LoanTerm>,
}

impl Default for LoanOptions {
    fn default() -> Self {
        Self {
            purposes: vec![
                LoanPurpose::new("Day-to-day capital", "general", 0.1),
                LoanPurpose::new("Vehicle or transport", "vehicle", 0.045),
                LoanPurpose::new("Financing a property", "property", 0.029),
            ],
            periods: vec![
                RepaymentPeriod::new("Weekly", 52),
                RepaymentPeriod::new("Fortnightly", 26),
                RepaymentPeriod::new("Monthly", 12),
            ],
            terms: vec![
                LoanTerm::new("6 months", 6),
                LoanTerm::new("12 months", 12),
                LoanTerm::new("2 years", 24),
                LoanTerm::new("3 years", 36),
                LoanTerm::new("5 years", 60),
                LoanTerm::new("10 years", 120),
                LoanTerm::new("20 years", 240),
            ],
        }
    }
}

impl LoanOptions {
    pub fn purpose(&self, value: &str) -> LoanCalcResult<&LoanPurpose> {
        self.purposes
            .iter()
            .find(|p| p.value == value)
            .ok_or_else(|| unknown("purpose", value))
    }

    pub fn period(&self, payments_per_year: u32) -> LoanCalcResult<&RepaymentPeriod> {
        self.periods
            .iter()
            .find(|p| p.value == payments_per_year)
            .ok_or_else(|| unknown("repayment period", payments_per_year))
    }

    pub fn term(&self, months: u32) -> LoanCalcResult<&LoanTerm> {
        self.terms
            .iter()
            .find(|t| t.value == months)
            .ok_or_else(|| unknown("loan term", months))
    }

    /// Check a catalogue loaded from configuration or a remote source.
    pub fn validate(&self) -> LoanCalcResult<()> {
        for p in &self.purposes {
            if !p.annual_rate.is_finite() || p.annual_rate < 0.0 {
                return Err(LoanCalcError::InvalidInput {
                    field: format!("purposes.{}.annualRate", p.value),
                    reason: "Annual rate must be finite and >= 0".into(),
                });
            }
        }
        if let Some(p) = self.periods.iter().find(|p| p.value == 0) {
            return Err(LoanCalcError::InvalidInput {
                field: format!("periods.{}", p.label),
                reason: "Payments per year must be > 0".into(),
            });
        }
        if let Some(t) = self.terms.iter().find(|t| t.value == 0) {
            return Err(LoanCalcError::InvalidInput {
                field: format!("terms.{}", t.label),
                reason: "Term must be > 0 months".into(),
            });
        }
        ensure_unique("purposes", self.purposes.iter().map(|p| p.value.as_str()))?;
        ensure_unique("periods", self.periods.iter().map(|p| p.value))?;
        ensure_unique("terms", self.terms.iter().map(|t| t.value))?;
        Ok(())
    }
}

fn unknown(kind: &str, value: impl ToString) -> LoanCalcError {
    LoanCalcError::UnknownOption {
        kind: kind.into(),
        value: value.to_string(),
    }
}

fn ensure_unique<T: Eq + Hash + ToString>(
    list: &str,
    values: impl Iterator<Item = T>,
) -> LoanCalcResult<()> {
    let mut seen = HashSet::new();
    for v in values {
        let text = v.to_string();
        if !seen.insert(v) {
            return Err(LoanCalcError::InvalidInput {
                field: list.into(),
                reason: format!("Duplicate option value '{text}'"),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

/// A source of loan options.
pub trait OptionsProvider {
    fn loan_purposes(&self) -> LoanCalcResult<Vec<LoanPurpose>>;

    fn repayment_periods(&self) -> LoanCalcResult<Vec<RepaymentPeriod>>;

    fn loan_terms(&self) -> LoanCalcResult<Vec<LoanTerm>>;

    /// Fetch all three lists; fails if any one of them is unavailable.
    fn load_all(&self) -> LoanCalcResult<LoanOptions> {
        Ok(LoanOptions {
            purposes: self.loan_purposes()?,
            periods: self.repayment_periods()?,
            terms: self.loan_terms()?,
        })
    }
}

/// In-memory provider over a fixed catalogue.
#[derive(Debug, Clone, Default)]
pub struct StaticOptions {
    options: LoanOptions,
}

impl StaticOptions {
    pub fn new(options: LoanOptions) -> Self {
        Self { options }
    }
}

impl OptionsProvider for StaticOptions {
    fn loan_purposes(&self) -> LoanCalcResult<Vec<LoanPurpose>> {
        Ok(self.options.purposes.clone())
    }

    fn repayment_periods(&self) -> LoanCalcResult<Vec<RepaymentPeriod>> {
        Ok(self.options.periods.clone())
    }

    fn loan_terms(&self) -> LoanCalcResult<Vec<LoanTerm>> {
        Ok(self.options.terms.clone())
    }

    fn load_all(&self) -> LoanCalcResult<LoanOptions> {
        Ok(self.options.clone())
    }
}
