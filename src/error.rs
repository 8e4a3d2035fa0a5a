use thiserror::Error;

/// Errors raised by the filter and view stages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// The current criteria select no records. Non-fatal: the caller warns
    /// and skips rendering for this interaction.
    #[error("no records match the current filters")]
    EmptyResult,
    #[error("invalid age range: minimum {min} is greater than maximum {max}")]
    InvalidAgeRange { min: u32, max: u32 },
}
