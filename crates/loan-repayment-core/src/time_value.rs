use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::types::{Amount, Rate};
use crate::LoanCalcResult;

/// When in each period the payment falls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTiming {
    /// Ordinary annuity: payment at the end of each period.
    #[default]
    End,
    /// Annuity due: payment at the start of each period.
    Beginning,
}

/// Payment (PMT)
///
/// Follows the spreadsheet sign convention: a positive present value (cash
/// received) produces a negative payment (cash paid out).
pub fn pmt(
    rate: Rate,
    nper: f64,
    present_value: Amount,
    future_value: Amount,
    timing: PaymentTiming,
) -> LoanCalcResult<Amount> {
    if !nper.is_finite() || nper <= 0.0 {
        return Err(LoanCalcError::invalid(
            "nper",
            "Number of periods must be finite and > 0",
        ));
    }
    if !rate.is_finite() || rate <= -1.0 {
        return Err(LoanCalcError::invalid(
            "rate",
            "Periodic rate must be finite and greater than -100%",
        ));
    }

    let one_plus_r = 1.0 + rate;

    // Rates below f64 resolution behave as zero-interest.
    if rate == 0.0 || one_plus_r == 1.0 {
        return finite(
            -(present_value + future_value) / nper,
            "PMT zero-rate payment",
        );
    }

    let timing_factor = match timing {
        PaymentTiming::End => 1.0,
        PaymentTiming::Beginning => one_plus_r,
    };

    let factor = one_plus_r.powf(nper);
    let annuity_factor = (factor - 1.0) / rate * timing_factor;
    if annuity_factor == 0.0 {
        return Err(LoanCalcError::arithmetic("PMT annuity factor"));
    }
    // An infinite annuity factor over a finite numerator gives -0.0, not an
    // overflow, so both terms must be finite for the direct form.
    if annuity_factor.is_finite() {
        let payment = -(present_value * factor + future_value) / annuity_factor;
        if payment.is_finite() {
            return Ok(payment);
        }
    }

    // Compounding overflowed; divide through by (1 + r)^n instead.
    let discount = one_plus_r.powf(-nper);
    finite(
        -(present_value + future_value * discount) * rate / ((1.0 - discount) * timing_factor),
        "PMT annuity payment",
    )
}

fn finite(value: f64, context: &str) -> LoanCalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LoanCalcError::arithmetic(context))
    }
}
