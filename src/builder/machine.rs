//! Builder for constructing state machines.

use crate::core::{StateId, StateRef};
use crate::machine::{MachineConfig, StateMachine};

/// Builder for constructing state machines with a fluent API.
///
/// States are registered in the order they were added, so their `on_awake`
/// hooks fire in that order during [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use panelstack::{StateBuilder, StateMachineBuilder};
///
/// let machine = StateMachineBuilder::new()
///     .name("MainCanvas")
///     .initial_state(1)
///     .state(StateBuilder::new(1, "Title").into_ref())
///     .state(StateBuilder::new(2, "Credits").into_ref())
///     .build_and_start();
///
/// assert_eq!(machine.name(), "MainCanvas");
/// assert_eq!(machine.depth(), 1);
/// ```
#[derive(Default)]
pub struct StateMachineBuilder {
    config: MachineConfig,
    states: Vec<StateRef>,
}

impl StateMachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the machine name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// State pushed by `start()`.
    pub fn initial_state(mut self, id: impl Into<StateId>) -> Self {
        self.config.initial_state = Some(id.into());
        self
    }

    /// Set the history capacity.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Set the diagnostics buffer capacity.
    pub fn diagnostics_capacity(mut self, capacity: usize) -> Self {
        self.config.diagnostics_capacity = capacity;
        self
    }

    /// Add a state to register on build.
    pub fn state(mut self, state: StateRef) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = StateRef>) -> Self {
        self.states.extend(states);
        self
    }

    /// Build the machine and register every state. The stack stays empty.
    pub fn build(self) -> StateMachine {
        let machine = StateMachine::with_config(self.config);
        for state in self.states {
            machine.add_state(state);
        }
        machine
    }

    /// Build, then push the configured initial state.
    pub fn build_and_start(self) -> StateMachine {
        let machine = self.build();
        machine.start();
        machine
    }
}
