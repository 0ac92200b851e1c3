//! Day-granular capacity calendar.
//!
//! Describes how much work a resource can carry on each calendar day:
//! a weekly pattern of capacities plus dated exceptions (holidays,
//! overtime, reduced days).
//!
//! # Precedence
//! An exception on a day overrides the weekly pattern for that day.
//! A day is a working day iff its resulting capacity is non-zero.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::Effort;

/// A dated override of the weekly capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarException {
    /// Day the override applies to.
    pub day: NaiveDate,
    /// Capacity for that day (zero = non-working).
    pub capacity: Effort,
}

impl CalendarException {
    /// Creates a new exception.
    pub fn new(day: NaiveDate, capacity: Effort) -> Self {
        Self { day, capacity }
    }
}

/// Resource capacity calendar.
///
/// `weekly` is indexed by [`Weekday::num_days_from_monday`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityCalendar {
    /// Calendar identifier.
    pub id: String,
    /// Capacity per weekday, Monday first.
    pub weekly: [Effort; 7],
    /// Dated overrides of the weekly pattern.
    pub exceptions: Vec<CalendarException>,
}

impl CapacityCalendar {
    /// Creates a calendar with no capacity on any day.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            weekly: [Effort::zero(); 7],
            exceptions: Vec::new(),
        }
    }

    /// Same capacity on every day of the week.
    pub fn uniform(id: impl Into<String>, capacity: Effort) -> Self {
        Self {
            weekly: [capacity; 7],
            ..Self::new(id)
        }
    }

    /// `capacity` Monday to Friday, nothing at weekends.
    pub fn weekdays(id: impl Into<String>, capacity: Effort) -> Self {
        let mut cal = Self::uniform(id, capacity);
        cal.weekly[Weekday::Sat.num_days_from_monday() as usize] = Effort::zero();
        cal.weekly[Weekday::Sun.num_days_from_monday() as usize] = Effort::zero();
        cal
    }

    /// Sets the capacity of one weekday.
    pub fn with_weekday(mut self, weekday: Weekday, capacity: Effort) -> Self {
        self.weekly[weekday.num_days_from_monday() as usize] = capacity;
        self
    }

    /// Overrides the capacity of one day. A later override of the same
    /// day replaces the earlier one.
    pub fn with_exception(mut self, day: NaiveDate, capacity: Effort) -> Self {
        self.exceptions.retain(|e| e.day != day);
        self.exceptions.push(CalendarException::new(day, capacity));
        self
    }

    /// Marks a day as non-working.
    pub fn with_holiday(self, day: NaiveDate) -> Self {
        self.with_exception(day, Effort::zero())
    }

    /// Capacity available on `day`.
    pub fn capacity_on(&self, day: NaiveDate) -> Effort {
        self.exceptions
            .iter()
            .find(|e| e.day == day)
            .map(|e| e.capacity)
            .unwrap_or_else(|| self.weekly[day.weekday().num_days_from_monday() as usize])
    }

    /// Whether `day` has any capacity.
    pub fn is_working_day(&self, day: NaiveDate) -> bool {
        !self.capacity_on(day).is_zero()
    }

    /// First working day at or after `from`, looking at most `horizon_days`
    /// days ahead.
    ///
    /// Returns `None` if no working day exists in that range.
    pub fn next_working_day(&self, from: NaiveDate, horizon_days: u32) -> Option<NaiveDate> {
        (0..horizon_days)
            .map_while(|offset| from.checked_add_days(Days::new(u64::from(offset))))
            .find(|&day| self.is_working_day(day))
    }

    /// Total capacity within the half-open range `[start, end)`.
    pub fn capacity_in_range(&self, start: NaiveDate, end: NaiveDate) -> Effort {
        start
            .iter_days()
            .take_while(|&day| day < end)
            .map(|day| self.capacity_on(day))
            .sum()
    }
}
