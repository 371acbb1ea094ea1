//! Query events - Defines events that trigger state transitions

use portal_core::ClassificationOutcome;
use serde::{Deserialize, Serialize};

/// Defines the events that can trigger state transitions in the FSM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryEvent {
    // ========== User Events ==========
    /// User submitted a non-empty query and it was appended to the log.
    QuerySubmitted,

    // ========== Classifier Events ==========
    /// Classification request was sent.
    ClassificationRequested,

    /// Classification request completed, successfully or not.
    OutcomeReceived { outcome: ClassificationOutcome },

    // ========== Resolution Events ==========
    /// The terminal bot message was appended.
    BotMessageAppended,

    /// The in-flight flag was cleared.
    InFlightCleared,
}

impl QueryEvent {
    /// Check if this event is user-initiated.
    pub fn is_user_event(&self) -> bool {
        matches!(self, Self::QuerySubmitted)
    }

    /// Check if this event carries a failed classification.
    pub fn is_error_event(&self) -> bool {
        matches!(self, Self::OutcomeReceived { outcome } if outcome.is_failure())
    }

    /// Short name used in logs and transition errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::QuerySubmitted => "query_submitted",
            Self::ClassificationRequested => "classification_requested",
            Self::OutcomeReceived { .. } => "outcome_received",
            Self::BotMessageAppended => "bot_message_appended",
            Self::InFlightCleared => "in_flight_cleared",
        }
    }
}
