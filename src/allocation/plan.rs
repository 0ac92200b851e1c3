//! Accumulated per-target assignments of one run.

use crate::models::{DayAssignment, Effort};

/// Day assignments gathered during a run, indexed by target position.
///
/// Append-only: nothing is removed once added. Owned by the driver until
/// the sequences are handed to the capacity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationPlan {
    per_target: Vec<Vec<DayAssignment>>,
}

impl AllocationPlan {
    /// Creates an empty plan for `target_count` targets.
    pub fn new(target_count: usize) -> Self {
        Self {
            per_target: vec![Vec::new(); target_count],
        }
    }

    /// Appends assignments to a target's sequence.
    ///
    /// # Panics
    /// Panics if `index` is not a slot of this plan.
    pub fn append(&mut self, index: usize, assignments: Vec<DayAssignment>) {
        self.per_target[index].extend(assignments);
    }

    /// Assignments of one target so far.
    pub fn assignments(&self, index: usize) -> &[DayAssignment] {
        self.per_target.get(index).map_or(&[], Vec::as_slice)
    }

    /// Effort placed for one target so far.
    pub fn total(&self, index: usize) -> Effort {
        DayAssignment::sum(self.assignments(index))
    }

    /// Releases the per-target sequences, in target order.
    pub fn into_sequences(self) -> Vec<Vec<DayAssignment>> {
        self.per_target
    }
}
