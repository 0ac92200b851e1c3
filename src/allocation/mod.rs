//! Resource-effort allocation.
//!
//! Places a fixed amount of effort over a set of allocation targets,
//! each asking for a share proportional to its resources-per-day goal.
//!
//! # Flow
//!
//! ```text
//! AllocationDriver::until_allocating(effort)
//!   ├─ ShareCalculator    proportional shares, infeasible targets pruned
//!   ├─ per target walk    day by day until its share is placed
//!   └─ commit             one finished sequence per target
//! ```
//!
//! A run is synchronous and owns all of its intermediate state. Hosts
//! that plan several tasks concurrently use one driver per task.

mod config;
mod driver;
mod plan;
mod report;
mod share;

pub use config::AllocatorConfig;
pub use driver::AllocationDriver;
pub use plan::AllocationPlan;
pub use report::{AllocationReport, TargetSummary};
pub use share::{EffortShare, ShareCalculator, ShareOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::CalendarCapacity;
    use crate::models::{
        AllocationTarget, CapacityCalendar, Effort, ResourcesPerDay, TargetId, TaskWindow,
    };
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    // 2024-03-04 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn target(id: &str, goal: &str) -> AllocationTarget {
        AllocationTarget::new(id, goal.parse().unwrap())
    }

    fn committed_total(p: &CalendarCapacity, id: &str) -> Effort {
        p.committed(&TargetId::new(id))
            .map(|c| c.total())
            .unwrap_or_default()
    }

    #[test]
    fn test_one_target_with_half_day_capacity() {
        let provider = CalendarCapacity::new()
            .with_calendar("A", CapacityCalendar::uniform("cal", Effort::hours(4)));
        let mut driver = AllocationDriver::new(
            &TaskWindow::starting(monday()),
            vec![target("A", "1.00")],
            provider,
        )
        .unwrap();

        let end = driver.until_allocating(Effort::hours(8)).unwrap();

        assert_eq!(end, monday() + chrono::Days::new(2));
        assert_eq!(committed_total(driver.provider(), "A"), Effort::hours(8));
    }

    #[test]
    fn test_two_to_one_goals_split_exactly() {
        let provider = CalendarCapacity::new()
            .with_calendar("A", CapacityCalendar::uniform("cal", Effort::hours(8)))
            .with_calendar("B", CapacityCalendar::uniform("cal", Effort::hours(8)));
        let mut driver = AllocationDriver::new(
            &TaskWindow::starting(monday()),
            vec![target("A", "1.0"), target("B", "0.5")],
            provider,
        )
        .unwrap();

        let report = driver.allocate(Effort::hours(9)).unwrap();

        let a = report.summary_for(&TargetId::new("A")).unwrap();
        let b = report.summary_for(&TargetId::new("B")).unwrap();
        assert_eq!(a.share, Some(Effort::hours(6)));
        assert_eq!(b.share, Some(Effort::hours(3)));
        // A takes 8h/day → 1 day; B takes 4h/day → 1 day
        assert_eq!(report.end_date, monday() + chrono::Days::new(a.days.max(b.days) as u64));
        assert_eq!(report.end_date, monday() + chrono::Days::new(1));
        assert_eq!(committed_total(driver.provider(), "A"), Effort::hours(6));
        assert_eq!(committed_total(driver.provider(), "B"), Effort::hours(3));
    }

    #[test]
    fn test_infeasible_target_hands_whole_request_to_survivor() {
        // X can carry 30 minutes a day; within a 5 day horizon that is
        // 2.5h, short of its 4.5h first-round share.
        let provider = CalendarCapacity::new()
            .with_feasibility_horizon(5)
            .with_calendar("X", CapacityCalendar::uniform("cal", Effort::minutes(30)))
            .with_calendar("Y", CapacityCalendar::uniform("cal", Effort::hours(8)));
        let mut driver = AllocationDriver::new(
            &TaskWindow::starting(monday()),
            vec![target("X", "1"), target("Y", "1")],
            provider,
        )
        .unwrap();

        let report = driver.allocate(Effort::hours(9)).unwrap();

        assert_eq!(report.rounds, 2);
        assert_eq!(report.unsatisfied().collect::<Vec<_>>(), vec![&TargetId::new("X")]);
        let p = driver.provider();
        assert!(p.is_unsatisfied(&TargetId::new("X")));
        assert_eq!(committed_total(p, "X"), Effort::zero());
        assert_eq!(committed_total(p, "Y"), Effort::hours(9));
        assert_eq!(report.end_date, monday() + chrono::Days::new(2));
    }

    #[test]
    fn test_all_targets_infeasible_is_no_progress() {
        let provider = CalendarCapacity::new();
        let mut driver = AllocationDriver::new(
            &TaskWindow::starting(monday()),
            vec![target("A", "1"), target("B", "0.5")],
            provider,
        )
        .unwrap();

        let report = driver.allocate(Effort::hours(8)).unwrap();

        assert_eq!(report.end_date, monday());
        assert_eq!(report.assigned_total(), Effort::zero());
        assert_eq!(report.shortfall(), Effort::hours(8));
        let p = driver.provider();
        assert!(p.is_unsatisfied(&TargetId::new("A")));
        assert!(p.is_unsatisfied(&TargetId::new("B")));
        assert_eq!(committed_total(p, "A"), Effort::zero());
        assert_eq!(committed_total(p, "B"), Effort::zero());
    }

    #[test]
    fn test_zero_effort_is_idempotent() {
        let provider = CalendarCapacity::new()
            .with_calendar("A", CapacityCalendar::uniform("cal", Effort::hours(8)));
        let mut driver = AllocationDriver::new(
            &TaskWindow::starting(monday()),
            vec![target("A", "1"), target("B", "2")],
            provider,
        )
        .unwrap();

        for _ in 0..3 {
            assert_eq!(driver.until_allocating(Effort::zero()).unwrap(), monday());
        }
        assert_eq!(committed_total(driver.provider(), "A"), Effort::zero());
        assert_eq!(committed_total(driver.provider(), "B"), Effort::zero());
    }

    #[test]
    fn test_conservation_with_ample_capacity() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let n = rng.random_range(1..6);
            let mut provider = CalendarCapacity::new();
            let mut targets = Vec::new();
            for i in 0..n {
                let id = format!("T{i}");
                let goal = ResourcesPerDay::from_hundredths(rng.random_range(1..300));
                let hours = rng.random_range(1..12);
                provider = provider
                    .with_calendar(&id, CapacityCalendar::weekdays("cal", Effort::hours(hours)));
                targets.push(AllocationTarget::new(id, goal));
            }
            let effort = Effort::seconds(rng.random_range(0..200_000));

            let mut driver =
                AllocationDriver::new(&TaskWindow::starting(monday()), targets, provider).unwrap();
            let report = driver.allocate(effort).unwrap();

            assert_eq!(report.rounds, 1);
            assert_eq!(report.assigned_total(), effort);
            let committed: Effort = driver
                .targets()
                .iter()
                .map(|t| committed_total(driver.provider(), t.id.as_str()))
                .sum();
            assert_eq!(committed, effort);
            let latest = driver
                .targets()
                .iter()
                .filter_map(|t| driver.provider().committed(&t.id))
                .filter_map(|c| crate::models::DayAssignment::last_day(&c.assignments))
                .max();
            if let Some(last) = latest {
                assert!(last < report.end_date);
            }
        }
    }
}
