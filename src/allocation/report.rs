//! Allocation run report.
//!
//! Summarizes what a run did: where it started and ended, what each
//! target was asked to absorb and what it actually received.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Elapsed days | max over targets of days walked |
//! | Assigned total | sum of all placed effort |
//! | Shortfall | requested - assigned (zero when fully placed) |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::plan::AllocationPlan;
use super::share::ShareOutcome;
use crate::models::{AllocationTarget, Effort, ResourcesPerDay, TargetId};

/// What happened to one target in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSummary {
    /// Target identity.
    pub target_id: TargetId,
    /// Goal the target was allocated with.
    pub goal: ResourcesPerDay,
    /// Share from the converged round; `None` if pruned.
    pub share: Option<Effort>,
    /// Effort actually placed.
    pub assigned: Effort,
    /// Days walked until the share was exhausted.
    pub days: u32,
    /// Number of day assignments produced.
    pub assignment_count: usize,
    /// Whether the target was marked unsatisfied.
    pub unsatisfied: bool,
}

/// Outcome of one [`AllocationDriver`](super::AllocationDriver) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReport {
    /// Day the allocation started.
    pub start: NaiveDate,
    /// Day all targets finished absorbing their share.
    pub end_date: NaiveDate,
    /// Days between `start` and `end_date`.
    pub elapsed_days: u32,
    /// Effort the run was asked to place.
    pub requested: Effort,
    /// Share-calculation rounds.
    pub rounds: usize,
    /// Per-target results, in target order.
    pub targets: Vec<TargetSummary>,
}

impl AllocationReport {
    /// Builds the report from the run's intermediate results.
    ///
    /// `days` holds the walked day count per target index.
    pub(crate) fn calculate(
        start: NaiveDate,
        end_date: NaiveDate,
        requested: Effort,
        targets: &[AllocationTarget],
        outcome: &ShareOutcome,
        plan: &AllocationPlan,
        days: &[u32],
    ) -> Self {
        let summaries = targets
            .iter()
            .enumerate()
            .map(|(i, t)| TargetSummary {
                target_id: t.id.clone(),
                goal: t.goal,
                share: outcome.share_of(i),
                assigned: plan.total(i),
                days: days.get(i).copied().unwrap_or(0),
                assignment_count: plan.assignments(i).len(),
                unsatisfied: outcome.pruned.contains(&i),
            })
            .collect();

        Self {
            start,
            end_date,
            elapsed_days: days.iter().copied().max().unwrap_or(0),
            requested,
            rounds: outcome.rounds,
            targets: summaries,
        }
    }

    /// Effort placed across all targets.
    pub fn assigned_total(&self) -> Effort {
        self.targets.iter().map(|t| t.assigned).sum()
    }

    /// Requested effort that was not placed.
    pub fn shortfall(&self) -> Effort {
        self.requested.saturating_sub(self.assigned_total())
    }

    /// Whether all requested effort was placed.
    pub fn is_fully_assigned(&self) -> bool {
        self.shortfall().is_zero()
    }

    /// Targets marked unsatisfied during the run.
    pub fn unsatisfied(&self) -> impl Iterator<Item = &TargetId> {
        self.targets
            .iter()
            .filter(|t| t.unsatisfied)
            .map(|t| &t.target_id)
    }

    /// Summary of one target.
    pub fn summary_for(&self, target_id: &TargetId) -> Option<&TargetSummary> {
        self.targets.iter().find(|t| &t.target_id == target_id)
    }
}
