//! Per-day assignment model.
//!
//! A day assignment records that some effort of a target is placed on a
//! resource on one calendar day. Assignments are produced only by a
//! [`CapacityProvider`](crate::capacity::CapacityProvider); the engine
//! never synthesizes them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Effort, TargetId};

/// Effort placed for one target on one resource and day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAssignment {
    /// Target the effort belongs to.
    pub target_id: TargetId,
    /// Resource carrying out the work.
    pub resource_id: String,
    /// Calendar day.
    pub day: NaiveDate,
    /// Effort placed that day.
    pub effort: Effort,
}

impl DayAssignment {
    /// Creates a new day assignment.
    pub fn new(
        target_id: TargetId,
        resource_id: impl Into<String>,
        day: NaiveDate,
        effort: Effort,
    ) -> Self {
        Self {
            target_id,
            resource_id: resource_id.into(),
            day,
            effort,
        }
    }

    /// Total effort of a sequence of assignments.
    pub fn sum(assignments: &[DayAssignment]) -> Effort {
        assignments.iter().map(|a| a.effort).sum()
    }

    /// Last day among the assignments carrying any effort.
    pub fn last_day(assignments: &[DayAssignment]) -> Option<NaiveDate> {
        assignments
            .iter()
            .filter(|a| !a.effort.is_zero())
            .map(|a| a.day)
            .max()
    }
}
