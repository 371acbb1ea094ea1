//! portal_session - Session-scoped state and the query controller
//!
//! - `store` - ConversationStore, the append-only message log
//! - `ministry` - MinistryContext with self-expiring switch notifications
//! - `state` - PortalState, the owned session state handed to the controller
//! - `controller` - QueryController, which drives one query at a time

pub mod controller;
pub mod error;
pub mod ministry;
pub mod state;
pub mod store;

pub use controller::{
    bot_reply, ClassifiedQuery, InFlightQuery, QueryController, Resolution,
    CONNECTIVITY_ERROR_TEXT, DEFAULT_LATENCY_FLOOR,
};
pub use error::{CompleteRejected, SubmitRejected};
pub use ministry::MinistryContext;
pub use state::PortalState;
pub use store::ConversationStore;
