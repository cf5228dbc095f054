use serde::Deserialize;
use std::time::Duration;

use loan_repayment_core::options::{LoanOptions, OptionsProvider, StaticOptions};
use loan_repayment_core::{GuardLimits, RepaymentCalculator};

use crate::input;
use crate::remote::{HttpOptionsConfig, HttpOptionsProvider, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding `api.base_url`.
pub const API_BASE_URL_ENV: &str = "REPAY_API_BASE_URL";

/// Settings loaded from `--config`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepayConfig {
    pub api: ApiConfig,
    pub limits: GuardLimits,
    /// Inline catalogue used when no API is configured
    pub options: Option<LoanOptions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RepayConfig {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = match path {
            Some(p) => input::file::read_yaml(p)?,
            None => Self::default(),
        };
        config.with_base_url_override(std::env::var(API_BASE_URL_ENV).ok())
    }

    fn with_base_url_override(
        mut self,
        base_url: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = Some(url);
        }
        if let Some(options) = &self.options {
            options.validate()?;
        }
        if self.api.timeout_secs == 0 {
            return Err("api.timeout_secs must be > 0".into());
        }
        Ok(self)
    }

    pub fn calculator(&self) -> RepaymentCalculator {
        RepaymentCalculator::with_limits(self.limits)
    }

    /// The API when a base URL is set, otherwise the inline or standard catalogue.
    pub fn provider(&self) -> Result<Box<dyn OptionsProvider>, Box<dyn std::error::Error>> {
        match &self.api.base_url {
            Some(base_url) => {
                tracing::debug!(base_url = %base_url, "Using HTTP loan options");
                let config = HttpOptionsConfig {
                    base_url: base_url.clone(),
                    timeout: Duration::from_secs(self.api.timeout_secs),
                };
                Ok(Box::new(HttpOptionsProvider::with_config(config)?))
            }
            None => Ok(Box::new(StaticOptions::new(
                self.options.clone().unwrap_or_default(),
            ))),
        }
    }
}
