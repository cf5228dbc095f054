pub mod engine;
pub mod input;

pub use engine::{
    compute_repayment, compute_repayment_json, compute_repayment_value, quote_repayment,
    try_compute_repayment, GuardLimits, RepaymentCalculator, RepaymentResult,
    DEFAULT_MAX_PERIODIC_RATE, DEFAULT_MAX_PERIODS,
};
pub use input::{RawValue, RepaymentRequest};
