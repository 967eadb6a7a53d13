use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortizeError {
    #[error("Invalid loan terms ({field}): {reason}")]
    InvalidLoanTerms { field: String, reason: String },

    #[error("Schedule did not converge: balance of {remaining_balance} still outstanding after {periods} periods")]
    NonConvergingSchedule {
        periods: u32,
        remaining_balance: Decimal,
    },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AmortizeError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        AmortizeError::InvalidLoanTerms {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for AmortizeError {
    fn from(e: serde_json::Error) -> Self {
        AmortizeError::SerializationError(e.to_string())
    }
}
