//! Core navigation types.
//!
//! This module contains the vocabulary shared by the machine and its states:
//! - State ids and the `UiState` hook trait
//! - Lifecycle events
//! - Bounded navigation history

mod history;
mod state;

pub use history::{
    NavigationHistory, NavigationKind, NavigationRecord, DEFAULT_HISTORY_CAPACITY,
};
pub use state::{LifecycleEvent, StateId, StateRef, UiState};
