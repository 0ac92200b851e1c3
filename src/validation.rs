//! Input validation for allocation runs.
//!
//! Checks the target set before any round executes. Detects:
//! - An empty target list
//! - Duplicate target IDs
//! - Goals that are all zero (nothing to weight the distribution by)

use crate::models::AllocationTarget;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No targets were given.
    EmptyTargets,
    /// Two targets share the same ID.
    DuplicateTarget,
    /// Every target has a zero goal.
    ZeroGoals,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the targets of an allocation run.
///
/// Checks:
/// 1. At least one target
/// 2. No duplicate target IDs
/// 3. At least one target with a non-zero goal
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_targets(targets: &[AllocationTarget]) -> ValidationResult {
    if targets.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyTargets,
            "Allocation needs at least one target",
        )]);
    }

    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for t in targets {
        if !ids.insert(&t.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTarget,
                format!("Duplicate target ID: {}", t.id),
            ));
        }
    }

    if targets.iter().all(|t| t.goal.is_zero()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroGoals,
            "Every target has a zero resources-per-day goal",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
