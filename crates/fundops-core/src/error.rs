use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// For callers that refuse the monthly fallback on an unrecognized
    /// custom pattern instead of degrading (see
    /// [`RecurrenceCalculator::custom_fallback`](crate::recurrence::RecurrenceCalculator::custom_fallback)).
    #[error("Unsupported frequency: {0}")]
    UnsupportedFrequency(String),
}
