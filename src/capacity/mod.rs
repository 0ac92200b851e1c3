//! Capacity collaborator interface.
//!
//! The allocation engine knows nothing about calendars or persistence.
//! Every capacity fact it needs, and every side effect it produces, goes
//! through a [`CapacityProvider`] passed into the driver.
//!
//! [`CalendarCapacity`] is an in-memory provider backed by per-resource
//! [`CapacityCalendar`](crate::models::CapacityCalendar)s.

mod calendar;

pub use calendar::{CalendarCapacity, CommittedAllocation};

use chrono::NaiveDate;

use crate::models::{AllocationTarget, DayAssignment, Effort, ResourcesPerDay};

/// Capacity facts and completion hooks consumed by the allocation engine.
///
/// Calls are synchronous and happen on the thread running the allocation.
pub trait CapacityProvider {
    /// Whether `target` can absorb `needed` effort from `start` onwards.
    fn has_available_capacity_from(
        &self,
        start: NaiveDate,
        target: &AllocationTarget,
        needed: Effort,
    ) -> bool;

    /// Assignments obtainable for `target` on `day`, never summing to more
    /// than `limit`. May return less, or nothing, when the day is full.
    fn create_assignments_at_day(
        &mut self,
        target: &AllocationTarget,
        day: NaiveDate,
        limit: Effort,
    ) -> Vec<DayAssignment>;

    /// Flags `target` as unable to absorb its share. Idempotent.
    fn mark_unsatisfied(&mut self, target: &AllocationTarget);

    /// Hands over the finished assignment sequence of `target`.
    fn commit_assignments(
        &mut self,
        target: &AllocationTarget,
        goal: ResourcesPerDay,
        assignments: Vec<DayAssignment>,
    );

    /// Returns assignments created during a run that failed before
    /// committing. Providers that reserve capacity when creating
    /// assignments release it here.
    fn discard_assignments(&mut self, _target: &AllocationTarget, _assignments: Vec<DayAssignment>) {}
}

impl<P: CapacityProvider + ?Sized> CapacityProvider for &mut P {
    fn has_available_capacity_from(
        &self,
        start: NaiveDate,
        target: &AllocationTarget,
        needed: Effort,
    ) -> bool {
        (**self).has_available_capacity_from(start, target, needed)
    }

    fn create_assignments_at_day(
        &mut self,
        target: &AllocationTarget,
        day: NaiveDate,
        limit: Effort,
    ) -> Vec<DayAssignment> {
        (**self).create_assignments_at_day(target, day, limit)
    }

    fn mark_unsatisfied(&mut self, target: &AllocationTarget) {
        (**self).mark_unsatisfied(target)
    }

    fn commit_assignments(
        &mut self,
        target: &AllocationTarget,
        goal: ResourcesPerDay,
        assignments: Vec<DayAssignment>,
    ) {
        (**self).commit_assignments(target, goal, assignments)
    }

    fn discard_assignments(&mut self, target: &AllocationTarget, assignments: Vec<DayAssignment>) {
        (**self).discard_assignments(target, assignments)
    }
}
