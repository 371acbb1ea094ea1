//! Query controller - drives one query from submission to its bot reply
//!
//! The lifecycle is split so the caller keeps ownership of `PortalState`
//! while the classification request is in flight:
//!
//! 1. `begin` appends the user message and hands out an `InFlightQuery`.
//! 2. `InFlightQuery::classify` awaits the classifier without touching state.
//! 3. `complete` applies the outcome and appends the single bot message.

use std::sync::Arc;
use std::time::Duration;

use classifier_client::ClassifierClient;
use log::{debug, error, info};
use portal_core::{ClassificationOutcome, Config, MessageId, MinistryId};
use portal_state::{QueryEvent, QueryState, StateMachine, StateTransition};

use crate::error::{CompleteRejected, SubmitRejected};
use crate::state::PortalState;

pub const DEFAULT_LATENCY_FLOOR: Duration = Duration::from_millis(500);

pub const CONNECTIVITY_ERROR_TEXT: &str =
    "Error: Could not reach the classification server. Please make sure it is running and try again.";

const RETRIEVAL_PENDING_TEXT: &str = "Retrieving relevant docs...";

/// Bot text for a classification outcome. Failures never leak their cause.
pub fn bot_reply(outcome: &ClassificationOutcome) -> String {
    match outcome.label() {
        Some(label) => format!("{label}. {RETRIEVAL_PENDING_TEXT}"),
        None => CONNECTIVITY_ERROR_TEXT.to_string(),
    }
}

/// A submitted query waiting for its classification.
#[must_use = "an in-flight query must be classified and completed"]
pub struct InFlightQuery {
    message_id: MessageId,
    query: String,
    classifier: Arc<dyn ClassifierClient>,
}

impl InFlightQuery {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Ask the classifier. Always runs to completion.
    pub async fn classify(self) -> ClassifiedQuery {
        let outcome = self.classifier.classify(&self.query).await;
        ClassifiedQuery {
            message_id: self.message_id,
            outcome,
        }
    }
}

/// A query whose classification is known but not yet applied.
#[must_use = "a classified query must be completed"]
#[derive(Debug)]
pub struct ClassifiedQuery {
    message_id: MessageId,
    outcome: ClassificationOutcome,
}

/// What a finished query did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub query_id: MessageId,
    pub reply_id: MessageId,
    pub outcome: ClassificationOutcome,
    /// Set only when the outcome caused a context switch.
    pub switched_to: Option<MinistryId>,
    pub reply: String,
}

pub struct QueryController {
    classifier: Arc<dyn ClassifierClient>,
    machine: StateMachine,
    latency_floor: Duration,
}

impl QueryController {
    pub fn new(classifier: Arc<dyn ClassifierClient>) -> Self {
        Self {
            classifier,
            machine: StateMachine::new(),
            latency_floor: DEFAULT_LATENCY_FLOOR,
        }
    }

    pub fn from_config(classifier: Arc<dyn ClassifierClient>, config: &Config) -> Self {
        Self::new(classifier).with_latency_floor(config.latency_floor())
    }

    /// Minimum delay between the classifier replying and the bot message.
    pub fn with_latency_floor(mut self, floor: Duration) -> Self {
        self.latency_floor = floor;
        self
    }

    pub fn state(&self) -> &QueryState {
        self.machine.state()
    }

    pub fn history(&self) -> &[StateTransition] {
        self.machine.history()
    }

    pub fn is_idle(&self) -> bool {
        self.machine.state().accepts_submission()
    }

    /// Append `text` as a user message and start its lifecycle.
    pub fn begin(
        &mut self,
        portal: &mut PortalState,
        text: &str,
    ) -> Result<InFlightQuery, SubmitRejected> {
        if !self.is_idle() {
            debug!("Ignoring submission while {:?}", self.machine.state());
            return Err(SubmitRejected::RequestAlreadyPending);
        }

        let message_id = portal
            .conversation
            .submit_user_query(text)
            .inspect_err(|reason| debug!("Ignoring submission: {}", reason))?;
        self.advance(QueryEvent::QuerySubmitted);

        let query = text.trim().to_string();
        info!("Classifying query #{:?} {:?}", message_id, query);
        self.advance(QueryEvent::ClassificationRequested);

        Ok(InFlightQuery {
            message_id,
            query,
            classifier: Arc::clone(&self.classifier),
        })
    }

    /// Start the lifecycle from the input buffer.
    pub fn begin_input(&mut self, portal: &mut PortalState) -> Result<InFlightQuery, SubmitRejected> {
        let text = portal.input().to_string();
        self.begin(portal, &text)
    }

    /// Apply a classification and append the bot reply.
    ///
    /// Refused without touching `portal` unless a query is being classified.
    pub async fn complete(
        &mut self,
        portal: &mut PortalState,
        classified: ClassifiedQuery,
    ) -> Result<Resolution, CompleteRejected> {
        let state = *self.machine.state();
        if !matches!(state, QueryState::Classifying) {
            debug!(
                "Ignoring outcome for query #{:?} while {:?}",
                classified.message_id, state
            );
            return Err(CompleteRejected::NotClassifying(state));
        }
        Ok(self.resolve(portal, classified).await)
    }

    async fn resolve(
        &mut self,
        portal: &mut PortalState,
        classified: ClassifiedQuery,
    ) -> Resolution {
        let outcome = classified.outcome;
        self.advance(QueryEvent::OutcomeReceived { outcome });

        let switched_to = match outcome.ministry() {
            Some(target) if portal.ministry.switch_to(target) => Some(target),
            _ => None,
        };

        let reply = bot_reply(&outcome);
        if !self.latency_floor.is_zero() {
            tokio::time::sleep(self.latency_floor).await;
        }

        let reply_id = portal.conversation.append_bot_message(reply.clone());
        self.advance(QueryEvent::BotMessageAppended);
        self.advance(QueryEvent::InFlightCleared);

        Resolution {
            query_id: classified.message_id,
            reply_id,
            outcome,
            switched_to,
            reply,
        }
    }

    /// Run a whole lifecycle for `text`.
    pub async fn submit(
        &mut self,
        portal: &mut PortalState,
        text: &str,
    ) -> Result<Resolution, SubmitRejected> {
        let in_flight = self.begin(portal, text)?;
        let classified = in_flight.classify().await;
        Ok(self.resolve(portal, classified).await)
    }

    fn advance(&mut self, event: QueryEvent) {
        if let Err(err) = self.machine.try_handle_event(event) {
            error!("Query lifecycle out of order: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use portal_core::{FailureReason, Sender};

    struct Always(ClassificationOutcome);

    #[async_trait]
    impl ClassifierClient for Always {
        async fn classify(&self, _query: &str) -> ClassificationOutcome {
            self.0
        }
    }

    fn senders(portal: &PortalState) -> Vec<Sender> {
        portal.messages().iter().map(|m| m.sender()).collect()
    }

    #[test]
    fn matched_reply_uses_wire_label() {
        let reply = bot_reply(&ClassificationOutcome::matched(MinistryId::Meity));
        assert_eq!(reply, "MEITY. Retrieving relevant docs...");
    }

    #[test]
    fn unclassified_reply_reports_label() {
        let reply = bot_reply(&ClassificationOutcome::Unclassified);
        assert_eq!(reply, "UNCLASSIFIED. Retrieving relevant docs...");
    }

    #[test]
    fn failure_reply_is_fixed() {
        let reply = bot_reply(&ClassificationOutcome::failed(
            FailureReason::NetworkUnavailable,
        ));
        assert_eq!(reply, CONNECTIVITY_ERROR_TEXT);
    }

    #[tokio::test(start_paused = true)]
    async fn outcome_is_applied_once_per_query() {
        let classifier = Arc::new(Always(ClassificationOutcome::matched(MinistryId::Meity)));
        let mut controller = QueryController::new(classifier);
        let mut portal = PortalState::new();

        let in_flight = controller.begin(&mut portal, "data centre rules").unwrap();
        let classified = in_flight.classify().await;
        let query_id = classified.message_id;
        let resolution = controller.complete(&mut portal, classified).await.unwrap();
        assert_eq!(resolution.switched_to, Some(MinistryId::Meity));

        let replayed = ClassifiedQuery {
            message_id: query_id,
            outcome: ClassificationOutcome::matched(MinistryId::Mnre),
        };
        assert_eq!(
            controller.complete(&mut portal, replayed).await,
            Err(CompleteRejected::NotClassifying(QueryState::Idle))
        );

        assert_eq!(senders(&portal), vec![Sender::User, Sender::Bot]);
        assert_eq!(portal.active_ministry(), MinistryId::Meity);
        assert!(!portal.pending_query());
        assert!(controller.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_after_refused_outcome_still_works() {
        let classifier = Arc::new(Always(ClassificationOutcome::Unclassified));
        let mut controller = QueryController::new(classifier).with_latency_floor(Duration::ZERO);
        let mut portal = PortalState::new();

        let stray = ClassifiedQuery {
            message_id: MessageId::new(7),
            outcome: ClassificationOutcome::Unclassified,
        };
        assert!(controller.complete(&mut portal, stray).await.is_err());
        assert!(portal.messages().is_empty());

        let resolution = controller.submit(&mut portal, "budget").await.unwrap();
        assert_eq!(resolution.outcome, ClassificationOutcome::Unclassified);
        assert_eq!(senders(&portal), vec![Sender::User, Sender::Bot]);
    }
}
