//! Share calculation with infeasibility pruning.
//!
//! # Algorithm
//!
//! 1. Weight every surviving target by its normalized daily goal.
//! 2. Split the full requested effort over those weights.
//! 3. Ask the provider whether each target can absorb its tentative share
//!    from the start day onwards.
//! 4. If every target can, the round converged.
//! 5. Otherwise mark each failing target unsatisfied, drop it, and repeat
//!    with the same total over the survivors.
//!
//! Every round either converges or removes at least one target, so the
//! loop ends after at most N rounds for N targets. A run in which every
//! target is pruned yields no shares.

use chrono::NaiveDate;

use crate::capacity::CapacityProvider;
use crate::distributor::ProportionalDistributor;
use crate::error::{AllocationError, Result};
use crate::models::{AllocationTarget, Effort};

/// Effort one target should absorb, as decided by a converged round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffortShare {
    /// Position of the target in the run's target list.
    pub index: usize,
    /// Effort assigned to the target.
    pub effort: Effort,
}

/// Outcome of share calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareOutcome {
    /// Shares of the converged round, in target order. Empty when every
    /// target was pruned.
    pub shares: Vec<EffortShare>,
    /// Number of rounds run.
    pub rounds: usize,
    /// Targets pruned as infeasible, in pruning order.
    pub pruned: Vec<usize>,
}

impl ShareOutcome {
    /// Whether no target received a share.
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Sum of all shares.
    pub fn total(&self) -> Effort {
        self.shares.iter().map(|s| s.effort).sum()
    }

    /// Share given to the target at `index`, if it survived.
    pub fn share_of(&self, index: usize) -> Option<Effort> {
        self.shares
            .iter()
            .find(|s| s.index == index)
            .map(|s| s.effort)
    }
}

/// Divides effort among targets, pruning those that cannot absorb it.
#[derive(Debug, Clone, Copy)]
pub struct ShareCalculator<'a> {
    targets: &'a [AllocationTarget],
}

impl<'a> ShareCalculator<'a> {
    /// Creates a calculator over the run's targets.
    pub fn new(targets: &'a [AllocationTarget]) -> Self {
        Self { targets }
    }

    /// Computes the converged shares of `total` starting on `start`.
    ///
    /// Fails only on precondition violations (no targets).
    pub fn calculate<P: CapacityProvider + ?Sized>(
        &self,
        provider: &mut P,
        start: NaiveDate,
        total: Effort,
    ) -> Result<ShareOutcome> {
        if self.targets.is_empty() {
            return Err(AllocationError::PreconditionViolation(
                "share calculation needs at least one target".into(),
            ));
        }

        let mut working: Vec<usize> = (0..self.targets.len()).collect();
        let mut pruned = Vec::new();
        let mut rounds = 0;

        for round in 1..=self.targets.len() {
            if working.is_empty() {
                break;
            }
            rounds = round;

            let tentative = match self.divide(&working, total)? {
                Some(shares) => shares,
                None => {
                    // Survivors have no weight left to carry the effort.
                    for &i in &working {
                        self.prune(provider, i, round);
                    }
                    pruned.append(&mut working);
                    break;
                }
            };

            let unsatisfied: Vec<usize> = tentative
                .iter()
                .filter(|s| {
                    !provider.has_available_capacity_from(start, &self.targets[s.index], s.effort)
                })
                .map(|s| s.index)
                .collect();

            tracing::debug!(
                round,
                candidates = working.len(),
                unsatisfied = unsatisfied.len(),
                %total,
                "share round"
            );

            if unsatisfied.is_empty() {
                return Ok(ShareOutcome {
                    shares: tentative,
                    rounds,
                    pruned,
                });
            }

            for &i in &unsatisfied {
                self.prune(provider, i, round);
            }
            working.retain(|i| !unsatisfied.contains(i));
            pruned.extend(unsatisfied);
        }

        debug_assert!(working.is_empty(), "share calculation did not converge");
        Ok(ShareOutcome {
            shares: Vec::new(),
            rounds,
            pruned,
        })
    }

    /// Splits `total` over the weights of `working`.
    ///
    /// Returns `None` when every surviving weight is zero and there is
    /// effort to place.
    fn divide(&self, working: &[usize], total: Effort) -> Result<Option<Vec<EffortShare>>> {
        let weights: Vec<u64> = working.iter().map(|&i| self.targets[i].weight()).collect();
        if weights.iter().all(|&w| w == 0) {
            if total.is_zero() {
                return Ok(Some(
                    working
                        .iter()
                        .map(|&index| EffortShare {
                            index,
                            effort: Effort::zero(),
                        })
                        .collect(),
                ));
            }
            return Ok(None);
        }

        let parts = ProportionalDistributor::new(weights)?.distribute(total.as_seconds());
        Ok(Some(
            working
                .iter()
                .zip(parts)
                .map(|(&index, seconds)| EffortShare {
                    index,
                    effort: Effort::seconds(seconds),
                })
                .collect(),
        ))
    }

    fn prune<P: CapacityProvider + ?Sized>(&self, provider: &mut P, index: usize, round: usize) {
        let target = &self.targets[index];
        tracing::warn!(target_id = %target.id, round, "allocation target cannot be satisfied");
        provider.mark_unsatisfied(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayAssignment, ResourcesPerDay, TargetId};
    use std::collections::HashMap;

    /// Provider whose targets can absorb up to a fixed effort each.
    #[derive(Default)]
    struct ScriptedProvider {
        absorbable: HashMap<TargetId, Effort>,
        marked: Vec<TargetId>,
    }

    impl ScriptedProvider {
        fn with(mut self, id: &str, max: Effort) -> Self {
            self.absorbable.insert(TargetId::new(id), max);
            self
        }
    }

    impl CapacityProvider for ScriptedProvider {
        fn has_available_capacity_from(
            &self,
            _start: NaiveDate,
            target: &AllocationTarget,
            needed: Effort,
        ) -> bool {
            self.absorbable
                .get(&target.id)
                .is_some_and(|&max| needed <= max)
        }

        fn create_assignments_at_day(
            &mut self,
            _target: &AllocationTarget,
            _day: NaiveDate,
            _limit: Effort,
        ) -> Vec<DayAssignment> {
            Vec::new()
        }

        fn mark_unsatisfied(&mut self, target: &AllocationTarget) {
            self.marked.push(target.id.clone());
        }

        fn commit_assignments(
            &mut self,
            _target: &AllocationTarget,
            _goal: ResourcesPerDay,
            _assignments: Vec<DayAssignment>,
        ) {
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn target(id: &str, hundredths: u32) -> AllocationTarget {
        AllocationTarget::new(id, ResourcesPerDay::from_hundredths(hundredths))
    }

    #[test]
    fn test_converges_in_one_round() {
        let targets = vec![target("A", 100), target("B", 50)];
        let mut p = ScriptedProvider::default()
            .with("A", Effort::hours(100))
            .with("B", Effort::hours(100));

        let outcome = ShareCalculator::new(&targets)
            .calculate(&mut p, start(), Effort::hours(9))
            .unwrap();

        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.share_of(0), Some(Effort::hours(6)));
        assert_eq!(outcome.share_of(1), Some(Effort::hours(3)));
        assert_eq!(outcome.total(), Effort::hours(9));
        assert!(outcome.pruned.is_empty());
        assert!(p.marked.is_empty());
    }

    #[test]
    fn test_pruned_target_effort_goes_to_survivors() {
        let targets = vec![target("X", 100), target("Y", 100)];
        let mut p = ScriptedProvider::default()
            .with("X", Effort::hours(1))
            .with("Y", Effort::hours(100));

        let outcome = ShareCalculator::new(&targets)
            .calculate(&mut p, start(), Effort::hours(9))
            .unwrap();

        assert_eq!(outcome.rounds, 2);
        assert_eq!(outcome.pruned, vec![0]);
        assert_eq!(outcome.share_of(0), None);
        // The whole request is re-divided, not just X's portion.
        assert_eq!(outcome.share_of(1), Some(Effort::hours(9)));
        assert_eq!(p.marked, vec![TargetId::new("X")]);
    }

    #[test]
    fn test_shares_recomputed_against_full_total() {
        // C fails first; then B fails with its larger second-round share.
        let targets = vec![target("A", 100), target("B", 100), target("C", 100)];
        let mut p = ScriptedProvider::default()
            .with("A", Effort::hours(100))
            .with("B", Effort::hours(4))
            .with("C", Effort::zero());

        let outcome = ShareCalculator::new(&targets)
            .calculate(&mut p, start(), Effort::hours(12))
            .unwrap();

        // Round 1: 4h each → C fails. Round 2: 6h each → B fails. Round 3: A 12h.
        assert_eq!(outcome.rounds, 3);
        assert_eq!(outcome.pruned, vec![2, 1]);
        assert_eq!(outcome.shares.len(), 1);
        assert_eq!(outcome.share_of(0), Some(Effort::hours(12)));
        assert_eq!(p.marked, vec![TargetId::new("C"), TargetId::new("B")]);
    }

    #[test]
    fn test_all_infeasible_yields_empty() {
        let targets = vec![target("A", 100), target("B", 50)];
        let mut p = ScriptedProvider::default();

        let outcome = ShareCalculator::new(&targets)
            .calculate(&mut p, start(), Effort::hours(8))
            .unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.total(), Effort::zero());
        assert_eq!(outcome.rounds, 1);
        assert_eq!(p.marked.len(), 2);
    }

    #[test]
    fn test_each_target_marked_once_and_rounds_bounded() {
        // 6h over 5, 4, 3, 2, 1 survivors gives 72, 90, 120, 180, 360
        // minutes; each limit sits just under one of those, so every round
        // prunes exactly one target until none is left.
        let targets: Vec<_> = (1..=5)
            .map(|i| target(&format!("T{i}"), 100))
            .collect();
        let mut p = ScriptedProvider::default();
        for (i, limit) in [60, 75, 105, 150, 300].into_iter().enumerate() {
            p = p.with(&format!("T{}", i + 1), Effort::minutes(limit));
        }

        let outcome = ShareCalculator::new(&targets)
            .calculate(&mut p, start(), Effort::hours(6))
            .unwrap();

        assert_eq!(outcome.rounds, targets.len());
        assert_eq!(outcome.pruned, vec![0, 1, 2, 3, 4]);
        assert!(outcome.is_empty());
        let expected: Vec<_> = (1..=5).map(|i| TargetId::new(format!("T{i}"))).collect();
        assert_eq!(p.marked, expected);
    }

    #[test]
    fn test_zero_weight_survivors_cannot_absorb() {
        let targets = vec![target("A", 100), target("Z", 0)];
        let mut p = ScriptedProvider::default().with("Z", Effort::hours(100));

        let outcome = ShareCalculator::new(&targets)
            .calculate(&mut p, start(), Effort::hours(8))
            .unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.pruned, vec![0, 1]);
        assert_eq!(p.marked, vec![TargetId::new("A"), TargetId::new("Z")]);
    }

    #[test]
    fn test_zero_effort_converges_with_zero_shares() {
        let targets = vec![target("A", 100), target("B", 50)];
        let mut p = ScriptedProvider::default()
            .with("A", Effort::zero())
            .with("B", Effort::zero());

        let outcome = ShareCalculator::new(&targets)
            .calculate(&mut p, start(), Effort::zero())
            .unwrap();

        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.shares.len(), 2);
        assert_eq!(outcome.total(), Effort::zero());
    }

    #[test]
    fn test_empty_targets_rejected() {
        let mut p = ScriptedProvider::default();
        let result = ShareCalculator::new(&[]).calculate(&mut p, start(), Effort::hours(1));
        assert!(matches!(
            result,
            Err(AllocationError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let targets = vec![target("A", 133), target("B", 67), target("C", 1)];
        let run = || {
            let mut p = ScriptedProvider::default()
                .with("A", Effort::hours(100))
                .with("B", Effort::hours(100))
                .with("C", Effort::hours(100));
            ShareCalculator::new(&targets)
                .calculate(&mut p, start(), Effort::seconds(100_003))
                .unwrap()
        };
        let first = run();
        assert_eq!(first, run());
        assert_eq!(first.total(), Effort::seconds(100_003));
    }
}
