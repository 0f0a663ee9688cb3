//! Builder API for ergonomic machine and state construction.
//!
//! This module provides fluent builders and macros for assembling machines
//! and states with minimal boilerplate.

pub mod machine;
pub mod macros;
pub mod state;

pub use machine::StateMachineBuilder;
pub use state::{ClosureState, StateBuilder};
