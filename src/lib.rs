//! Panelstack: a stack-based UI navigation state machine
//!
//! A [`StateMachine`] keeps a registry of named UI states (screens, panels,
//! overlays) and a navigation stack. Navigation is push, pop, replace and
//! clear; every change dispatches lifecycle hooks to the states involved in a
//! fixed, documented order.
//!
//! # Core Concepts
//!
//! - **State**: a [`UiState`] with a stable [`StateId`] and optional hooks
//!   (`on_awake`, `on_enter`, `on_exit`, `on_focus`, `on_defocus`, `on_update`)
//! - **Machine**: owns the registry and stack; the top of the stack is the
//!   focused state and receives `on_update` every tick
//! - **Diagnostics**: bad ids, duplicate registrations and misconfiguration
//!   never fail an operation; they are logged through `tracing` and kept in a
//!   bounded buffer
//!
//! # Example
//!
//! ```rust
//! use panelstack::{LifecycleEvent, StateBuilder, StateMachine};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let events = Rc::new(RefCell::new(Vec::new()));
//! let panel = |id: u32, name: &'static str| {
//!     let (on_enter, on_focus, on_defocus, on_exit) =
//!         (events.clone(), events.clone(), events.clone(), events.clone());
//!     StateBuilder::new(id, name)
//!         .on_enter(move |_| on_enter.borrow_mut().push((name, LifecycleEvent::Enter)))
//!         .on_focus(move |_| on_focus.borrow_mut().push((name, LifecycleEvent::Focus)))
//!         .on_defocus(move |_| on_defocus.borrow_mut().push((name, LifecycleEvent::Defocus)))
//!         .on_exit(move |_| on_exit.borrow_mut().push((name, LifecycleEvent::Exit)))
//!         .into_ref()
//! };
//!
//! let machine = StateMachine::new();
//! machine.add_state(panel(1, "A"));
//! machine.add_state(panel(2, "B"));
//!
//! machine.push_state(1);
//! machine.push_state(2);
//! machine.pop_state();
//!
//! assert_eq!(
//!     *events.borrow(),
//!     vec![
//!         ("A", LifecycleEvent::Enter),
//!         ("A", LifecycleEvent::Focus),
//!         ("A", LifecycleEvent::Defocus),
//!         ("B", LifecycleEvent::Enter),
//!         ("B", LifecycleEvent::Focus),
//!         ("B", LifecycleEvent::Defocus),
//!         ("B", LifecycleEvent::Exit),
//!         ("A", LifecycleEvent::Focus),
//!     ]
//! );
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{ClosureState, StateBuilder, StateMachineBuilder};
pub use self::core::{LifecycleEvent, NavigationHistory, StateId, StateRef, UiState};
pub use machine::{
    register, ConfigError, MachineConfig, MachineLink, StateError, StateMachine,
    WeakStateMachine,
};
