//! Identifier types for the task domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a task.
///
/// Task identifiers are allocated monotonically by the backing store,
/// starting at 1, and are never reused, not even when the task they were
/// allocated for fails to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a task identifier from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value of the identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}
