//! Task dates consumed by the allocation engine.
//!
//! The engine only needs two facts about the task being planned: its
//! nominal start date and the first day that is not consolidated.
//! Consolidated days are historical and must not be re-planned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source of the dates that bound where an allocation may start.
pub trait TaskDates {
    /// Nominal start date of the task.
    fn start_date(&self) -> NaiveDate;

    /// First day after the consolidated (frozen) part of the task.
    fn first_day_not_consolidated(&self) -> NaiveDate;

    /// Day the allocation starts: the later of both dates.
    fn allocation_start(&self) -> NaiveDate {
        self.start_date().max(self.first_day_not_consolidated())
    }
}

/// Plain value carrying a task's dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWindow {
    /// Nominal start date.
    pub start: NaiveDate,
    /// First non-consolidated day. Equal to `start` when nothing is
    /// consolidated.
    pub first_not_consolidated: NaiveDate,
}

impl TaskWindow {
    /// A task starting on `start` with no consolidated days.
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start,
            first_not_consolidated: start,
        }
    }

    /// Sets the first non-consolidated day.
    pub fn with_consolidated_until(mut self, first_not_consolidated: NaiveDate) -> Self {
        self.first_not_consolidated = first_not_consolidated;
        self
    }

    /// Captures the dates of any [`TaskDates`] source.
    pub fn of(task: &impl TaskDates) -> Self {
        Self {
            start: task.start_date(),
            first_not_consolidated: task.first_day_not_consolidated(),
        }
    }
}

impl TaskDates for TaskWindow {
    fn start_date(&self) -> NaiveDate {
        self.start
    }

    fn first_day_not_consolidated(&self) -> NaiveDate {
        self.first_not_consolidated
    }
}
