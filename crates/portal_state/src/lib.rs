//! portal_state - State machine for the portal query lifecycle
//!
//! A query moves from submission through classification to a single
//! resolution before the next one may start.

pub mod machine;

// Re-export commonly used types
pub use machine::{QueryEvent, QueryState, StateMachine, StateTransition, TransitionError};
