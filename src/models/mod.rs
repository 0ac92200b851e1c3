//! Allocation domain models.
//!
//! Value types shared by the distributor, the share calculator and the
//! driver: effort amounts, daily goals, allocation targets, per-day
//! assignments, task dates and capacity calendars.
//!
//! # Domain Mappings
//!
//! | u-allocate | Project planning | Manufacturing |
//! |------------|------------------|---------------|
//! | AllocationTarget | Resource allocation | Machine booking |
//! | ResourcesPerDay | Dedication | Shift share |
//! | DayAssignment | Day assignment | Shift load |
//! | TaskWindow | Task dates | Order release |

mod calendar;
mod day_assignment;
mod effort;
mod resources_per_day;
mod target;
mod task;

pub use calendar::{CalendarException, CapacityCalendar};
pub use day_assignment::DayAssignment;
pub use effort::Effort;
pub use resources_per_day::{ParseResourcesPerDayError, ResourcesPerDay};
pub use target::{AllocationTarget, TargetId};
pub use task::{TaskDates, TaskWindow};
