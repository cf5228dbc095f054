pub mod display;
pub mod error;
pub mod repayment;
pub mod time_value;
pub mod types;

#[cfg(feature = "options")]
pub mod options;

#[cfg(feature = "form")]
pub mod form;

pub use error::LoanCalcError;
pub use repayment::{
    compute_repayment, compute_repayment_json, compute_repayment_value, quote_repayment,
    try_compute_repayment, GuardLimits, RawValue, RepaymentCalculator, RepaymentRequest,
    RepaymentResult,
};
pub use types::*;

/// Standard result type for all loan-repayment operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
