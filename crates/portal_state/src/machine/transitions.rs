//! State transitions - FSM transition logic
//!
//! Implements the state machine that handles event-driven state transitions.

use portal_core::ClassificationOutcome;
use thiserror::Error;

use super::events::QueryEvent;
use super::states::QueryState;

/// Error type for invalid state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} with event {event}")]
    InvalidTransition { from: QueryState, event: String },
}

/// Represents a state transition result.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The state before the transition.
    pub from: QueryState,
    /// The state after the transition.
    pub to: QueryState,
    /// The event that triggered the transition.
    pub event: QueryEvent,
    /// Whether the state actually changed.
    pub changed: bool,
}

/// State machine for a single query lifecycle.
#[derive(Debug, Clone)]
pub struct StateMachine {
    /// Current state.
    current_state: QueryState,
    /// Transition history (limited).
    history: Vec<StateTransition>,
    /// Max history entries to keep.
    max_history: usize,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine in Idle state.
    pub fn new() -> Self {
        Self::with_state(QueryState::Idle)
    }

    /// Create a state machine with a specific initial state.
    pub fn with_state(state: QueryState) -> Self {
        Self {
            current_state: state,
            history: Vec::new(),
            max_history: 50,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> &QueryState {
        &self.current_state
    }

    /// Get the transition history.
    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Handle an event, staying put if the event does not apply.
    pub fn handle_event(&mut self, event: QueryEvent) -> StateTransition {
        let old_state = self.current_state;
        let new_state = Self::compute_next_state(&old_state, &event).unwrap_or(old_state);
        self.record(old_state, new_state, event)
    }

    /// Handle an event, rejecting it if it does not apply to the current state.
    pub fn try_handle_event(
        &mut self,
        event: QueryEvent,
    ) -> Result<StateTransition, TransitionError> {
        let old_state = self.current_state;
        match Self::compute_next_state(&old_state, &event) {
            Some(new_state) => Ok(self.record(old_state, new_state, event)),
            None => Err(TransitionError::InvalidTransition {
                from: old_state,
                event: event.name().to_string(),
            }),
        }
    }

    fn record(&mut self, from: QueryState, to: QueryState, event: QueryEvent) -> StateTransition {
        self.current_state = to;

        let transition = StateTransition {
            from,
            to,
            event,
            changed: from != to,
        };
        log::debug!(
            "query state {:?} -> {:?} on {}",
            transition.from,
            transition.to,
            transition.event.name()
        );

        // Add to history
        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }

    /// Compute the next state given current state and event.
    fn compute_next_state(state: &QueryState, event: &QueryEvent) -> Option<QueryState> {
        use QueryEvent::*;
        use QueryState::*;

        let next = match (state, event) {
            // ========== Submission ==========
            (Idle, QuerySubmitted) => Submitted,
            (Submitted, ClassificationRequested) => Classifying,

            // ========== Classification ==========
            (Classifying, OutcomeReceived { outcome }) => match outcome {
                ClassificationOutcome::Matched { ministry } => Matched {
                    ministry: *ministry,
                },
                ClassificationOutcome::Unclassified => Unclassified,
                ClassificationOutcome::Failed { reason } => Failed { reason: *reason },
            },

            // ========== Resolution ==========
            (Matched { .. } | Unclassified | Failed { .. }, BotMessageAppended) => Resolved,
            (Resolved, InFlightCleared) => Idle,

            _ => return None,
        };
        Some(next)
    }

    /// Check if a transition is valid without executing it.
    pub fn can_transition(&self, event: &QueryEvent) -> bool {
        Self::compute_next_state(&self.current_state, event).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{FailureReason, MinistryId};

    fn drive_to_classifying(sm: &mut StateMachine) {
        sm.try_handle_event(QueryEvent::QuerySubmitted).unwrap();
        sm.try_handle_event(QueryEvent::ClassificationRequested).unwrap();
    }

    #[test]
    fn test_matched_flow_returns_to_idle() {
        let mut sm = StateMachine::new();
        drive_to_classifying(&mut sm);
        assert_eq!(sm.state(), &QueryState::Classifying);

        let t = sm
            .try_handle_event(QueryEvent::OutcomeReceived {
                outcome: ClassificationOutcome::matched(MinistryId::Meity),
            })
            .unwrap();
        assert!(t.changed);
        assert_eq!(
            sm.state(),
            &QueryState::Matched {
                ministry: MinistryId::Meity
            }
        );

        sm.try_handle_event(QueryEvent::BotMessageAppended).unwrap();
        assert_eq!(sm.state(), &QueryState::Resolved);
        sm.try_handle_event(QueryEvent::InFlightCleared).unwrap();
        assert_eq!(sm.state(), &QueryState::Idle);
    }

    #[test]
    fn test_failure_resolves_like_any_outcome() {
        let mut sm = StateMachine::new();
        drive_to_classifying(&mut sm);
        sm.try_handle_event(QueryEvent::OutcomeReceived {
            outcome: ClassificationOutcome::failed(FailureReason::NetworkUnavailable),
        })
        .unwrap();
        assert!(matches!(sm.state(), QueryState::Failed { .. }));
        assert!(sm.can_transition(&QueryEvent::BotMessageAppended));
    }

    #[test]
    fn test_second_submission_is_rejected_while_in_flight() {
        let mut sm = StateMachine::new();
        drive_to_classifying(&mut sm);

        let err = sm.try_handle_event(QueryEvent::QuerySubmitted).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: QueryState::Classifying,
                event: "query_submitted".to_string(),
            }
        );
        assert_eq!(sm.state(), &QueryState::Classifying);
    }

    #[test]
    fn test_bot_message_requires_an_outcome() {
        let mut sm = StateMachine::with_state(QueryState::Classifying);
        let t = sm.handle_event(QueryEvent::BotMessageAppended);
        assert!(!t.changed);
        assert_eq!(sm.state(), &QueryState::Classifying);
    }

    #[test]
    fn test_history_tracking() {
        let mut sm = StateMachine::new();
        drive_to_classifying(&mut sm);

        assert_eq!(sm.history().len(), 2);
        assert_eq!(sm.history()[0].from, QueryState::Idle);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut sm = StateMachine::new();
        for _ in 0..60 {
            sm.handle_event(QueryEvent::InFlightCleared);
        }
        assert_eq!(sm.history().len(), 50);
    }
}
