//! State machine module
//!
//! Contains the FSM implementation for a single query lifecycle.

mod events;
mod states;
mod transitions;

pub use events::QueryEvent;
pub use states::QueryState;
pub use transitions::{StateMachine, StateTransition, TransitionError};
