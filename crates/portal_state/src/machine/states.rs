//! Query states - Defines all possible states of a query lifecycle

use portal_core::{FailureReason, MinistryId};
use serde::{Deserialize, Serialize};

/// Defines the possible states of a query's lifecycle.
///
/// Every state other than `Idle` means a query is in flight and new
/// submissions must be rejected.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueryState {
    /// Awaiting user input.
    #[default]
    Idle,

    /// The user message has been appended optimistically.
    Submitted,

    /// Waiting on the classification endpoint.
    Classifying,

    /// The query was routed to a ministry.
    Matched { ministry: MinistryId },

    /// The classifier recognised no ministry.
    Unclassified,

    /// The classifier could not be reached.
    Failed { reason: FailureReason },

    /// The bot message has been appended; the in-flight flag is next.
    Resolved,
}

impl QueryState {
    /// Check if this state accepts a new submission.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if a classification outcome has been recorded.
    pub fn has_outcome(&self) -> bool {
        matches!(
            self,
            Self::Matched { .. } | Self::Unclassified | Self::Failed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(QueryState::default(), QueryState::Idle);
    }

    #[test]
    fn test_only_idle_accepts_submission() {
        assert!(QueryState::Idle.accepts_submission());
        for state in [
            QueryState::Submitted,
            QueryState::Classifying,
            QueryState::Unclassified,
            QueryState::Resolved,
        ] {
            assert!(!state.accepts_submission(), "{state:?}");
        }
    }

    #[test]
    fn test_outcome_states() {
        let matched = QueryState::Matched {
            ministry: MinistryId::Meity,
        };
        assert!(matched.has_outcome());
        assert!(!QueryState::Classifying.has_outcome());
    }
}
