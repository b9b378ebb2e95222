//! Job lifecycle status.

use super::ParseJobStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a job posting.
///
/// Status only ever advances: `Open` → `InProgress` → `Completed`. The
/// `InProgress` edge is observational (the first successful assignment);
/// no operation is gated on it. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// The job is posted and no task has been assigned yet.
    Open,
    /// At least one task has been assigned.
    InProgress,
    /// Every task is complete and the owner closed the job. Terminal.
    Completed,
}

impl JobStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the status is terminal.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = ParseJobStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseJobStatusError(value.to_owned())),
        }
    }
}
