//! Error type for allocation runs.
//!
//! Infeasibility of a target is not an error: it is reported through
//! [`CapacityProvider::mark_unsatisfied`](crate::capacity::CapacityProvider::mark_unsatisfied)
//! and the run continues. Errors are reserved for precondition violations
//! and collaborator contract breaches.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Effort, TargetId};
use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AllocationError>;

/// Errors raised by an allocation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// A caller-side precondition does not hold (empty or all-zero weights,
    /// mismatched list sizes).
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// The target set failed validation.
    #[error("invalid allocation targets: {}", join_messages(.0))]
    InvalidTargets(Vec<ValidationError>),

    /// The capacity provider returned more effort than the requested limit.
    #[error("provider assigned {taken} to target {target} on {day}, above the limit of {limit}")]
    LimitExceeded {
        target: TargetId,
        day: NaiveDate,
        limit: Effort,
        taken: Effort,
    },

    /// A target still had effort left after the configured walk horizon.
    #[error("target {target} still had {remaining} to place after {days} days")]
    WalkHorizonExceeded {
        target: TargetId,
        days: u32,
        remaining: Effort,
    },

    /// Day arithmetic left the representable calendar range.
    #[error("date out of range: {start} + {days} days")]
    DateOutOfRange { start: NaiveDate, days: u32 },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
