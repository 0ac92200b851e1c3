//! Day-by-day allocation driver.
//!
//! # Algorithm
//!
//! 1. Start on the later of the task start and its first non-consolidated
//!    day.
//! 2. Obtain converged per-target shares from the [`ShareCalculator`].
//! 3. For each share, walk forward one day at a time, taking whatever the
//!    provider can give capped at the remaining share, until it is zero.
//! 4. The run ends `max(days walked)` days after the start.
//! 5. Hand every target's sequence to the provider.
//!
//! Nothing is committed if the run fails part way through.
//!
//! # Complexity
//! O(N² · F + Σ days) where N = targets and F = cost of one feasibility
//! check.

use chrono::{Days, NaiveDate};

use super::config::AllocatorConfig;
use super::plan::AllocationPlan;
use super::report::AllocationReport;
use super::share::{ShareCalculator, ShareOutcome};
use crate::capacity::CapacityProvider;
use crate::error::{AllocationError, Result};
use crate::models::{AllocationTarget, DayAssignment, Effort, TaskDates, TaskWindow};
use crate::validation::validate_targets;

/// Places a task's effort over its allocation targets.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_allocate::allocation::AllocationDriver;
/// use u_allocate::capacity::CalendarCapacity;
/// use u_allocate::models::{AllocationTarget, CapacityCalendar, Effort, ResourcesPerDay, TaskWindow};
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let provider = CalendarCapacity::new()
///     .with_calendar("W1", CapacityCalendar::uniform("half", Effort::hours(4)));
/// let targets = vec![AllocationTarget::new("W1", ResourcesPerDay::units(1))];
///
/// let mut driver = AllocationDriver::new(&TaskWindow::starting(monday), targets, provider).unwrap();
/// let end = driver.until_allocating(Effort::hours(8)).unwrap();
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
/// ```
#[derive(Debug)]
pub struct AllocationDriver<P: CapacityProvider> {
    task: TaskWindow,
    targets: Vec<AllocationTarget>,
    provider: P,
    config: AllocatorConfig,
}

impl<P: CapacityProvider> AllocationDriver<P> {
    /// Creates a driver for `task` over `targets`.
    ///
    /// Fails with [`AllocationError::InvalidTargets`] if the target set is
    /// empty, has duplicate IDs, or carries only zero goals.
    pub fn new(task: &impl TaskDates, targets: Vec<AllocationTarget>, provider: P) -> Result<Self> {
        validate_targets(&targets).map_err(AllocationError::InvalidTargets)?;
        Ok(Self {
            task: TaskWindow::of(task),
            targets,
            provider,
            config: AllocatorConfig::default(),
        })
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AllocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The run's targets.
    pub fn targets(&self) -> &[AllocationTarget] {
        &self.targets
    }

    /// The capacity provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Releases the capacity provider.
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Places `effort` and returns the day all targets are done.
    pub fn until_allocating(&mut self, effort: Effort) -> Result<NaiveDate> {
        self.allocate(effort).map(|report| report.end_date)
    }

    /// Places `effort` and returns the full run report.
    pub fn allocate(&mut self, effort: Effort) -> Result<AllocationReport> {
        let start = self.task.allocation_start();
        let outcome =
            ShareCalculator::new(&self.targets).calculate(&mut self.provider, start, effort)?;

        let mut plan = AllocationPlan::new(self.targets.len());
        let mut days = vec![0u32; self.targets.len()];
        let end_date = match self.walk_all(&outcome, start, &mut plan, &mut days) {
            Ok(end_date) => end_date,
            Err(err) => {
                self.discard(plan);
                return Err(err);
            }
        };
        let report = AllocationReport::calculate(
            start,
            end_date,
            effort,
            &self.targets,
            &outcome,
            &plan,
            &days,
        );

        for (target, assignments) in self.targets.iter().zip(plan.into_sequences()) {
            self.provider
                .commit_assignments(target, target.goal, assignments);
        }

        tracing::info!(
            %start,
            %end_date,
            elapsed_days = report.elapsed_days,
            requested = %effort,
            assigned = %report.assigned_total(),
            rounds = outcome.rounds,
            pruned = outcome.pruned.len(),
            "allocation finished"
        );
        Ok(report)
    }

    /// Walks every share and returns the day all of them are placed.
    fn walk_all(
        &mut self,
        outcome: &ShareOutcome,
        start: NaiveDate,
        plan: &mut AllocationPlan,
        days: &mut [u32],
    ) -> Result<NaiveDate> {
        for share in &outcome.shares {
            days[share.index] = self.walk(share.index, start, share.effort, plan)?;
        }
        add_days(start, days.iter().copied().max().unwrap_or(0))
    }

    /// Hands the sequences of a failed run back to the provider.
    fn discard(&mut self, plan: AllocationPlan) {
        for (target, assignments) in self.targets.iter().zip(plan.into_sequences()) {
            if !assignments.is_empty() {
                self.provider.discard_assignments(target, assignments);
            }
        }
    }

    /// Walks one target forward from `start` until `share` is placed.
    /// Returns the number of days walked.
    fn walk(
        &mut self,
        index: usize,
        start: NaiveDate,
        share: Effort,
        plan: &mut AllocationPlan,
    ) -> Result<u32> {
        let target = &self.targets[index];
        let mut remaining = share;
        let mut day: u32 = 0;

        while remaining > Effort::zero() {
            if day >= self.config.max_walk_days {
                return Err(AllocationError::WalkHorizonExceeded {
                    target: target.id.clone(),
                    days: day,
                    remaining,
                });
            }
            let current = add_days(start, day)?;
            let created = self
                .provider
                .create_assignments_at_day(target, current, remaining);
            let taken = DayAssignment::sum(&created);
            let left = remaining.checked_sub(taken);
            plan.append(index, created);
            remaining = left.ok_or_else(|| AllocationError::LimitExceeded {
                target: target.id.clone(),
                day: current,
                limit: remaining,
                taken,
            })?;
            day += 1;
        }

        tracing::debug!(target_id = %target.id, %share, days = day, "target walked");
        Ok(day)
    }
}

fn add_days(start: NaiveDate, days: u32) -> Result<NaiveDate> {
    start
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or(AllocationError::DateOutOfRange { start, days })
}
