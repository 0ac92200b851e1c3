//! Resource-effort allocation for the U-Engine ecosystem.
//!
//! Given a task that needs a fixed amount of effort and a set of
//! allocation targets, each with a resources-per-day goal, computes how
//! much of that effort each target absorbs day by day and the date on
//! which all of them are done.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Effort`, `ResourcesPerDay`,
//!   `AllocationTarget`, `DayAssignment`, `TaskWindow`, `CapacityCalendar`
//! - **`distributor`**: Exact proportional split of an integer quantity
//! - **`capacity`**: The `CapacityProvider` collaborator and an in-memory
//!   calendar-backed implementation
//! - **`allocation`**: Share calculation with infeasibility pruning and
//!   the day-walking `AllocationDriver`
//! - **`validation`**: Input integrity checks on the target set
//!
//! # Architecture
//!
//! The engine consumes calendar and capacity facts through a narrow
//! trait and produces an in-memory plan plus an end date. It does not
//! persist anything, does not decide which resources exist, and runs
//! synchronously on the caller's thread.
//!
//! # References
//!
//! - Balinski & Young (2001), "Fair Representation"
//! - Kolisch & Hartmann (2006), "Experimental investigation of heuristics
//!   for resource-constrained project scheduling"

pub mod allocation;
pub mod capacity;
pub mod distributor;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{AllocationError, Result};
