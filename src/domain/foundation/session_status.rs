//! Session lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a diagnostic session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Pre-interview preparation; economic inputs being gathered.
    Preparation,
    /// Interview underway; dysfunctions being recorded.
    InProgress,
    /// Interview concluded; data remains editable for consolidation.
    Completed,
    /// Soft-deleted; read-only.
    Archived,
}

impl SessionStatus {
    /// Whether the session's data can still be modified.
    pub fn is_mutable(&self) -> bool {
        !matches!(self, SessionStatus::Archived)
    }

    /// Whether a transition to the target status is allowed.
    ///
    /// Forward progression only, plus archiving from any live state.
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        match (self, target) {
            (SessionStatus::Preparation, SessionStatus::InProgress) => true,
            (SessionStatus::InProgress, SessionStatus::Completed) => true,
            (SessionStatus::Archived, _) => false,
            (_, SessionStatus::Archived) => true,
            _ => false,
        }
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Preparation
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Preparation => "preparation",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progression_is_forward_only() {
        assert!(SessionStatus::Preparation.can_transition_to(&SessionStatus::InProgress));
        assert!(SessionStatus::InProgress.can_transition_to(&SessionStatus::Completed));
        assert!(!SessionStatus::Completed.can_transition_to(&SessionStatus::Preparation));
        assert!(!SessionStatus::InProgress.can_transition_to(&SessionStatus::Preparation));
    }

    #[test]
    fn any_live_state_can_archive() {
        assert!(SessionStatus::Preparation.can_transition_to(&SessionStatus::Archived));
        assert!(SessionStatus::InProgress.can_transition_to(&SessionStatus::Archived));
        assert!(SessionStatus::Completed.can_transition_to(&SessionStatus::Archived));
    }

    #[test]
    fn archived_is_terminal_and_immutable() {
        assert!(!SessionStatus::Archived.can_transition_to(&SessionStatus::InProgress));
        assert!(!SessionStatus::Archived.is_mutable());
        assert!(SessionStatus::Completed.is_mutable());
    }
}
