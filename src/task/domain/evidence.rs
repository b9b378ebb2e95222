//! Evidence value type.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proof of completed work submitted by a task's assignee.
///
/// Typically a link to the deliverable. Evidence is a non-empty string; an
/// empty submission would be indistinguishable from "nothing submitted yet"
/// and is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evidence(String);

impl Evidence {
    /// Creates evidence from a non-empty string.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyEvidence`] when the input is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyEvidence);
        }
        Ok(Self(trimmed))
    }

    /// Returns the evidence as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
