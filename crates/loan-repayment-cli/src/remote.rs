//! HTTP source for the loan option catalogue.
//!
//! Each list lives at its own endpoint under a common base URL and is served
//! as a JSON array of `{ label, value }` records (purposes also carry
//! `annualRate`).

use std::time::Duration;

use loan_repayment_core::options::{
    LoanOptions, LoanPurpose, LoanTerm, OptionsProvider, RepaymentPeriod,
};
use loan_repayment_core::{LoanCalcError, LoanCalcResult};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

pub const LOAN_PURPOSES_PATH: &str = "/loan-purposes";
pub const REPAYMENT_PERIODS_PATH: &str = "/requested-repayment-periods";
pub const LOAN_TERMS_PATH: &str = "/requested-term-months";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the options client
#[derive(Debug, Clone)]
pub struct HttpOptionsConfig {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpOptionsConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Options provider backed by the loan options API.
pub struct HttpOptionsProvider {
    config: HttpOptionsConfig,
    client: Client,
}

impl HttpOptionsProvider {
    pub fn with_config(config: HttpOptionsConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.config.base_url, path)
    }

    fn fetch<T: DeserializeOwned>(&self, path: &str) -> LoanCalcResult<Vec<T>> {
        let url = self.url(path);

        tracing::debug!(url = %url, "Fetching loan options");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| unavailable(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Loan options request failed");
            return Err(LoanCalcError::OptionsUnavailable(format!(
                "{url} returned {status}"
            )));
        }

        let body = response.text().map_err(|e| unavailable(&url, e))?;
        decode_options(&url, &body)
    }
}

impl OptionsProvider for HttpOptionsProvider {
    fn loan_purposes(&self) -> LoanCalcResult<Vec<LoanPurpose>> {
        self.fetch(LOAN_PURPOSES_PATH)
    }

    fn repayment_periods(&self) -> LoanCalcResult<Vec<RepaymentPeriod>> {
        self.fetch(REPAYMENT_PERIODS_PATH)
    }

    fn loan_terms(&self) -> LoanCalcResult<Vec<LoanTerm>> {
        self.fetch(LOAN_TERMS_PATH)
    }

    fn load_all(&self) -> LoanCalcResult<LoanOptions> {
        let options = LoanOptions {
            purposes: self.loan_purposes()?,
            periods: self.repayment_periods()?,
            terms: self.loan_terms()?,
        };
        options.validate()?;
        Ok(options)
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn unavailable(url: &str, err: reqwest::Error) -> LoanCalcError {
    tracing::warn!(url = %url, error = %err, "Loan options request failed");
    LoanCalcError::OptionsUnavailable(format!("{url}: {err}"))
}

fn decode_options<T: DeserializeOwned>(url: &str, body: &str) -> LoanCalcResult<Vec<T>> {
    serde_json::from_str(body).map_err(|e| {
        LoanCalcError::OptionsUnavailable(format!("{url}: unexpected payload: {e}"))
    })
}
