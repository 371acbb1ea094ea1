use portal_core::{Message, MinistryId, SwitchNotification};

use crate::ministry::MinistryContext;
use crate::store::ConversationStore;

/// Session-scoped state owned by the presentation layer.
///
/// The UI gets read access and may edit the input buffer; every other
/// mutation goes through `QueryController`.
#[derive(Debug, Default)]
pub struct PortalState {
    pub(crate) conversation: ConversationStore,
    pub(crate) ministry: MinistryContext,
}

impl PortalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the session in `ministry` instead of the default.
    pub fn with_ministry(ministry: MinistryId) -> Self {
        Self {
            conversation: ConversationStore::new(),
            ministry: MinistryContext::new(ministry),
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn started(&self) -> bool {
        self.conversation.started()
    }

    pub fn pending_query(&self) -> bool {
        self.conversation.pending_query()
    }

    pub fn active_ministry(&self) -> MinistryId {
        self.ministry.active()
    }

    pub fn notification(&self) -> Option<SwitchNotification> {
        self.ministry.notification()
    }

    pub fn input(&self) -> &str {
        self.conversation.input()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.conversation.set_input(text);
    }

    /// Text of the loading indicator while a query is pending.
    pub fn loading_text(&self) -> Option<String> {
        self.pending_query()
            .then(|| format!("Checking {} database...", self.active_ministry()))
    }

    /// Placeholder for the input box.
    pub fn input_placeholder(&self) -> String {
        format!("Ask a question about {}...", self.active_ministry())
    }
}
