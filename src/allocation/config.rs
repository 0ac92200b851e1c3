//! Driver configuration.

use serde::{Deserialize, Serialize};

/// Tunables of an [`AllocationDriver`](super::AllocationDriver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Days a single target may walk before the run is aborted.
    pub max_walk_days: u32,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_walk_days: Self::DEFAULT_MAX_WALK_DAYS,
        }
    }
}

impl AllocatorConfig {
    /// Ten years of calendar days.
    pub const DEFAULT_MAX_WALK_DAYS: u32 = 3_650;

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the walk horizon.
    pub fn with_max_walk_days(mut self, days: u32) -> Self {
        self.max_walk_days = days;
        self
    }
}
