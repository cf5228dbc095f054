use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoanCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic failure in {context}")]
    ArithmeticFailure { context: String },

    #[error("Unknown {kind} option: {value}")]
    UnknownOption { kind: String, value: String },

    #[error("Loan options unavailable: {0}")]
    OptionsUnavailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanCalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn arithmetic(context: impl Into<String>) -> Self {
        LoanCalcError::ArithmeticFailure {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}
