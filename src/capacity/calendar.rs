//! Calendar-backed capacity provider.
//!
//! Each target draws on the calendar of its resource. On a given day a
//! target may take its goal's share of the resource's capacity, limited
//! by whatever the resource still has free that day.
//!
//! # Capacity Model
//!
//! ```text
//! available(target, day) = min(capacity(day) * goal,
//!                              capacity(day) - load(resource, day))
//! ```
//!
//! `load` is everything this provider has handed out for the resource on
//! that day, excluding the target's own previous commit. Re-committing a
//! target releases the load of its previously committed assignments;
//! discarded assignments of a failed run are released immediately.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::CapacityProvider;
use crate::models::{
    AllocationTarget, CapacityCalendar, DayAssignment, Effort, ResourcesPerDay, TargetId,
};

/// Assignments handed over for one target at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedAllocation {
    /// Goal the target was allocated with.
    pub goal: ResourcesPerDay,
    /// Finished day assignments.
    pub assignments: Vec<DayAssignment>,
}

impl CommittedAllocation {
    /// Total committed effort.
    pub fn total(&self) -> Effort {
        DayAssignment::sum(&self.assignments)
    }
}

/// In-memory [`CapacityProvider`] over resource calendars.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_allocate::capacity::{CalendarCapacity, CapacityProvider};
/// use u_allocate::models::{AllocationTarget, CapacityCalendar, Effort, ResourcesPerDay};
///
/// let provider = CalendarCapacity::new()
///     .with_calendar("W1", CapacityCalendar::uniform("std", Effort::hours(8)));
/// let target = AllocationTarget::new("W1", ResourcesPerDay::units(1));
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
///
/// assert!(provider.has_available_capacity_from(monday, &target, Effort::hours(40)));
/// ```
#[derive(Debug, Clone)]
pub struct CalendarCapacity {
    calendars: HashMap<String, CapacityCalendar>,
    feasibility_horizon_days: u32,
    load: HashMap<(String, NaiveDate), Effort>,
    unsatisfied: BTreeSet<TargetId>,
    committed: HashMap<TargetId, CommittedAllocation>,
}

impl Default for CalendarCapacity {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarCapacity {
    /// Default number of days the feasibility check looks ahead.
    pub const DEFAULT_FEASIBILITY_HORIZON_DAYS: u32 = 3_650;

    /// Creates a provider with no calendars.
    pub fn new() -> Self {
        Self {
            calendars: HashMap::new(),
            feasibility_horizon_days: Self::DEFAULT_FEASIBILITY_HORIZON_DAYS,
            load: HashMap::new(),
            unsatisfied: BTreeSet::new(),
            committed: HashMap::new(),
        }
    }

    /// Registers the calendar of a resource.
    pub fn with_calendar(mut self, resource_id: impl Into<String>, calendar: CapacityCalendar) -> Self {
        self.calendars.insert(resource_id.into(), calendar);
        self
    }

    /// Sets how many days ahead the feasibility check looks.
    pub fn with_feasibility_horizon(mut self, days: u32) -> Self {
        self.feasibility_horizon_days = days;
        self
    }

    /// Calendar of a resource, if registered.
    pub fn calendar(&self, resource_id: &str) -> Option<&CapacityCalendar> {
        self.calendars.get(resource_id)
    }

    /// Effort handed out for a resource on a day.
    pub fn load_on(&self, resource_id: &str, day: NaiveDate) -> Effort {
        self.load
            .get(&(resource_id.to_string(), day))
            .copied()
            .unwrap_or_default()
    }

    /// Effort `target` could still take on `day`.
    pub fn available_on(&self, target: &AllocationTarget, day: NaiveDate) -> Effort {
        let Some(calendar) = self.calendars.get(target.resource()) else {
            return Effort::zero();
        };
        let capacity = calendar.capacity_on(day);
        let foreign = self
            .load_on(target.resource(), day)
            .saturating_sub(self.committed_on(target, day));
        capacity.scale_by(target.goal).min(capacity.saturating_sub(foreign))
    }

    /// Effort already committed for `target` on its resource and `day`.
    ///
    /// A target being re-planned does not compete with its own previous
    /// commit; that load is released when the new sequence is committed.
    fn committed_on(&self, target: &AllocationTarget, day: NaiveDate) -> Effort {
        self.committed
            .get(&target.id)
            .map(|c| {
                c.assignments
                    .iter()
                    .filter(|a| a.day == day && a.resource_id == target.resource())
                    .map(|a| a.effort)
                    .sum()
            })
            .unwrap_or_default()
    }

    /// Whether `target` has been marked unsatisfied.
    pub fn is_unsatisfied(&self, target_id: &TargetId) -> bool {
        self.unsatisfied.contains(target_id)
    }

    /// Targets marked unsatisfied, in identifier order.
    pub fn unsatisfied(&self) -> impl Iterator<Item = &TargetId> {
        self.unsatisfied.iter()
    }

    /// Committed assignments of a target.
    pub fn committed(&self, target_id: &TargetId) -> Option<&CommittedAllocation> {
        self.committed.get(target_id)
    }

    /// Number of targets with committed assignments.
    pub fn committed_count(&self) -> usize {
        self.committed.len()
    }

    /// Forgets all handed-out load, unsatisfied flags and commits.
    pub fn reset(&mut self) {
        self.load.clear();
        self.unsatisfied.clear();
        self.committed.clear();
    }

    fn release(&mut self, assignments: &[DayAssignment]) {
        for a in assignments {
            let key = (a.resource_id.clone(), a.day);
            let emptied = match self.load.get_mut(&key) {
                Some(load) => {
                    *load = load.saturating_sub(a.effort);
                    load.is_zero()
                }
                None => false,
            };
            if emptied {
                self.load.remove(&key);
            }
        }
    }
}

impl CapacityProvider for CalendarCapacity {
    fn has_available_capacity_from(
        &self,
        start: NaiveDate,
        target: &AllocationTarget,
        needed: Effort,
    ) -> bool {
        if needed.is_zero() {
            return true;
        }
        let mut found = Effort::zero();
        for offset in 0..self.feasibility_horizon_days {
            let Some(day) = start.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            found += self.available_on(target, day);
            if found >= needed {
                return true;
            }
        }
        false
    }

    fn create_assignments_at_day(
        &mut self,
        target: &AllocationTarget,
        day: NaiveDate,
        limit: Effort,
    ) -> Vec<DayAssignment> {
        let taken = self.available_on(target, day).min(limit);
        if taken.is_zero() {
            return Vec::new();
        }
        let resource = target.resource().to_string();
        *self.load.entry((resource.clone(), day)).or_default() += taken;
        vec![DayAssignment::new(target.id.clone(), resource, day, taken)]
    }

    fn mark_unsatisfied(&mut self, target: &AllocationTarget) {
        self.unsatisfied.insert(target.id.clone());
    }

    fn discard_assignments(&mut self, _target: &AllocationTarget, assignments: Vec<DayAssignment>) {
        self.release(&assignments);
    }

    fn commit_assignments(
        &mut self,
        target: &AllocationTarget,
        goal: ResourcesPerDay,
        assignments: Vec<DayAssignment>,
    ) {
        if let Some(previous) = self.committed.remove(&target.id) {
            self.release(&previous.assignments);
        }
        self.committed.insert(
            target.id.clone(),
            CommittedAllocation { goal, assignments },
        );
    }
}
