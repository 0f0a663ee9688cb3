//! Diagnostic error types.

use crate::core::StateId;
use thiserror::Error;

/// Problems detected while registering or navigating states.
///
/// None of these abort an operation: the machine logs them, stores them in
/// its diagnostics buffer and returns a no-op result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    /// A state was created without an owning machine and stays inert
    #[error("state '{state}' requires an owning state machine and will stay inert")]
    MissingStateMachine { state: String },

    /// Navigation referenced an id that was never registered
    #[error("state id {id} does not exist in the state machine")]
    UnknownStateId { id: StateId },

    /// A second state tried to register under an existing id
    #[error("state id {id} is already registered, ignoring '{state}'")]
    DuplicateRegistration { id: StateId, state: String },

    /// An absent state was handed to `add_state`
    #[error("attempted to add an absent state to the state machine")]
    NullState,

    /// The configured initial state is not registered at startup
    #[error("initial state {id} is not registered with the state machine")]
    MisconfiguredInitialState { id: StateId },
}
