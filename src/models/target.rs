//! Allocation target model.
//!
//! A target is one resource allocation asking for a share of a task's
//! effort, together with its daily goal.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ResourcesPerDay;

/// Identity of a resource allocation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    /// Creates a target identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TargetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A resource allocation and its desired daily goal.
///
/// Immutable for the duration of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationTarget {
    /// Allocation identity.
    pub id: TargetId,
    /// Resources per day this allocation wants.
    pub goal: ResourcesPerDay,
    /// Resource the allocation draws capacity from. `None` = same as `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl AllocationTarget {
    /// Creates a target with the given goal.
    pub fn new(id: impl Into<TargetId>, goal: ResourcesPerDay) -> Self {
        Self {
            id: id.into(),
            goal,
            resource_id: None,
        }
    }

    /// Sets the backing resource.
    pub fn with_resource(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Resource the allocation draws capacity from.
    pub fn resource(&self) -> &str {
        self.resource_id.as_deref().unwrap_or(self.id.as_str())
    }

    /// Distributor weight for this target's goal.
    #[inline]
    pub fn weight(&self) -> u64 {
        self.goal.normalized_weight()
    }
}
