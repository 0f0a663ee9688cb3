//! The navigation state machine.
//!
//! [`StateMachine`] owns the registry of known states and the navigation
//! stack. It is a cheap, clonable handle: states receive it in every hook and
//! may navigate from there. No internal borrow is ever held while a hook runs,
//! so re-entrant navigation executes immediately.
//!
//! The machine tracks which state holds focus. `Focus` is only dispatched when
//! nothing holds it and `Defocus` only to the holder, so at most one state is
//! focused at any time, even when hooks navigate.
//!
//! # Dispatch order
//!
//! | operation        | hooks, in order                                         |
//! |------------------|---------------------------------------------------------|
//! | `push_state(id)` | old top `Defocus`, new top `Enter`, new top `Focus`     |
//! | `pop_state()`    | popped `Defocus`, popped `Exit`, new top `Focus`        |
//! | `clear_states()` | top `Defocus`, then `Exit` for every entry top-down     |
//! | `set_state(id)`  | `clear_states()` followed by `push_state(id)`           |
//! | `update_tick()`  | top `Update`                                            |
//!
//! When a hook navigates, the nested operation runs to completion first and
//! the outer operation skips whatever it made redundant. A state whose
//! `on_enter` pops itself is never focused, and a state pushed from an
//! `on_exit` hook during `pop_state` keeps the focus the push gave it.

mod config;
mod dispatch;
mod error;
mod link;

pub use config::{ConfigError, MachineConfig, DEFAULT_DIAGNOSTICS_CAPACITY};
pub use error::StateError;
pub use link::MachineLink;

use crate::core::{
    LifecycleEvent, NavigationHistory, NavigationKind, NavigationRecord, StateId, StateRef,
    UiState,
};
use chrono::Utc;
use dispatch::dispatch;
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};
use uuid::Uuid;

struct Inner {
    instance_id: Uuid,
    config: MachineConfig,
    registry: RefCell<HashMap<StateId, StateRef>>,
    stack: RefCell<Vec<StateRef>>,
    focused: RefCell<Option<StateRef>>,
    history: RefCell<NavigationHistory>,
    diagnostics: RefCell<VecDeque<StateError>>,
}

/// Stack-based navigation controller.
///
/// # Example
///
/// ```rust
/// use panelstack::{StateBuilder, StateMachine};
///
/// let machine = StateMachine::new();
/// machine.add_state(StateBuilder::new(1, "Title").into_ref());
/// machine.add_state(StateBuilder::new(2, "Options").into_ref());
///
/// machine.push_state(1);
/// machine.push_state(2);
/// assert_eq!(machine.depth(), 2);
///
/// machine.pop_state();
/// assert_eq!(machine.peek_state().map(|s| s.id().get()), Some(1));
///
/// machine.set_state(2);
/// assert_eq!(machine.depth(), 1);
/// ```
#[derive(Clone)]
pub struct StateMachine {
    inner: Rc<Inner>,
}

/// Non-owning handle to a [`StateMachine`].
#[derive(Clone, Debug)]
pub struct WeakStateMachine {
    inner: Weak<Inner>,
}

impl WeakStateMachine {
    /// The machine, if it is still alive.
    pub fn upgrade(&self) -> Option<StateMachine> {
        self.inner.upgrade().map(|inner| StateMachine { inner })
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a machine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Create a machine with the given configuration.
    pub fn with_config(config: MachineConfig) -> Self {
        let history = NavigationHistory::with_capacity(config.history_capacity);
        Self {
            inner: Rc::new(Inner {
                instance_id: Uuid::new_v4(),
                config,
                registry: RefCell::new(HashMap::new()),
                stack: RefCell::new(Vec::new()),
                focused: RefCell::new(None),
                history: RefCell::new(history),
                diagnostics: RefCell::new(VecDeque::new()),
            }),
        }
    }

    /// Unique id of this machine instance, used in log fields.
    pub fn instance_id(&self) -> Uuid {
        self.inner.instance_id
    }

    /// The configured machine name.
    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    /// The configuration this machine was built with.
    pub fn config(&self) -> &MachineConfig {
        &self.inner.config
    }

    /// Create a non-owning handle.
    pub fn downgrade(&self) -> WeakStateMachine {
        WeakStateMachine {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Register a state under its id.
    ///
    /// The first state registered under an id wins; later ones are reported
    /// and ignored. `on_awake` fires on every call with a present state, even
    /// for an ignored duplicate. Returns whether a new entry was created.
    pub fn add_state(&self, state: impl Into<Option<StateRef>>) -> bool {
        let Some(state) = state.into() else {
            self.report(StateError::NullState);
            return false;
        };

        let id = state.id();
        let inserted = match self.inner.registry.borrow_mut().entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(state.clone());
                true
            }
            Entry::Occupied(_) => false,
        };

        if inserted {
            debug!(machine = %self.name(), state = %state.name(), %id, "registered state");
        } else {
            self.report(StateError::DuplicateRegistration {
                id,
                state: state.name().to_string(),
            });
        }

        if let Some(link) = state.link() {
            link.bind(self);
        }
        dispatch(self, state.as_ref(), LifecycleEvent::Awake);
        inserted
    }

    /// Whether a state is registered under `id`. Misses are reported.
    pub fn contains_state(&self, id: impl Into<StateId>) -> bool {
        self.registered(id.into()).is_some()
    }

    /// The registered state for `id`, without reporting a miss.
    pub fn get_state(&self, id: impl Into<StateId>) -> Option<StateRef> {
        self.inner.registry.borrow().get(&id.into()).cloned()
    }

    /// The current top of the stack.
    pub fn peek_state(&self) -> Option<StateRef> {
        self.inner.stack.borrow().last().cloned()
    }

    /// Push the state registered under `id` and focus it.
    ///
    /// Unknown ids are reported and nothing happens. Returns whether a push
    /// occurred.
    ///
    /// `Focus` follows `Enter` only if the pushed entry is still the top and
    /// nothing took focus while `on_enter` ran. An `on_enter` that pops
    /// itself therefore yields `Enter, Exit` for the pushed state and `Focus`
    /// for the state beneath it.
    pub fn push_state(&self, id: impl Into<StateId>) -> bool {
        let id = id.into();
        let Some(next) = self.registered(id) else {
            return false;
        };

        let previous = self.peek_state();
        if let Some(previous) = &previous {
            self.defocus(previous);
        }

        let depth = {
            let mut stack = self.inner.stack.borrow_mut();
            stack.push(next.clone());
            stack.len()
        };
        self.record(
            NavigationKind::Push,
            previous.map(|s| s.id()),
            Some(id),
            depth,
        );
        debug!(machine = %self.name(), state = %next.name(), %id, depth, "pushed state");

        dispatch(self, next.as_ref(), LifecycleEvent::Enter);
        let still_top = self.depth() == depth
            && self
                .peek_state()
                .is_some_and(|top| std::ptr::addr_eq(Rc::as_ptr(&top), Rc::as_ptr(&next)));
        if still_top {
            self.focus(&next);
        }
        true
    }

    /// Pop the top state and refocus the one beneath it.
    ///
    /// Returns the popped state, or `None` when the stack was empty.
    ///
    /// If an `on_exit` hook pushes, that push already focused the new top and
    /// no second `Focus` is sent.
    pub fn pop_state(&self) -> Option<StateRef> {
        let popped = self.take_top()?;
        let (next, depth) = {
            let stack = self.inner.stack.borrow();
            (stack.last().cloned(), stack.len())
        };
        self.record(
            NavigationKind::Pop,
            Some(popped.id()),
            next.as_ref().map(|s| s.id()),
            depth,
        );
        debug!(machine = %self.name(), state = %popped.name(), depth, "popped state");

        self.defocus(&popped);
        dispatch(self, popped.as_ref(), LifecycleEvent::Exit);

        // Re-read the top: the hooks above may have navigated.
        if let Some(next) = self.peek_state() {
            self.focus(&next);
        }
        Some(popped)
    }

    /// Replace the whole stack with the state registered under `id`.
    ///
    /// Every stacked state exits, including when `id` is already the top.
    pub fn set_state(&self, id: impl Into<StateId>) -> bool {
        let id = id.into();
        if !self.contains_state(id) {
            return false;
        }
        self.clear_states();
        self.push_state(id)
    }

    /// Exit every stacked state, top first.
    ///
    /// Only the original top is defocused, unless an `on_exit` hook pushes
    /// and focuses another state, which is then defocused before it exits.
    /// Returns the number of exited entries.
    pub fn clear_states(&self) -> usize {
        let Some(top) = self.peek_state() else {
            return 0;
        };
        self.defocus(&top);

        let mut exited = 0;
        while let Some(state) = self.take_top() {
            self.defocus(&state);
            dispatch(self, state.as_ref(), LifecycleEvent::Exit);
            exited += 1;
        }

        self.record(NavigationKind::Clear, Some(top.id()), None, 0);
        debug!(machine = %self.name(), exited, "cleared states");
        exited
    }

    /// Per-frame hook: update the focused state, if any.
    pub fn update_tick(&self) -> bool {
        match self.peek_state() {
            Some(top) => {
                dispatch(self, top.as_ref(), LifecycleEvent::Update);
                true
            }
            None => false,
        }
    }

    /// Host startup: push the configured initial state.
    ///
    /// Returns whether a push occurred.
    pub fn start(&self) -> bool {
        let Some(initial) = self.inner.config.initial_state else {
            return false;
        };
        if !self.inner.registry.borrow().contains_key(&initial) {
            self.report(StateError::MisconfiguredInitialState { id: initial });
            return false;
        }
        self.push_state(initial)
    }

    /// Whether `state` is reference-identical to the current top.
    pub fn is_focused(&self, state: &dyn UiState) -> bool {
        self.peek_state()
            .is_some_and(|top| std::ptr::addr_eq(Rc::as_ptr(&top), state))
    }

    /// Number of stacked entries.
    pub fn depth(&self) -> usize {
        self.inner.stack.borrow().len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.depth() == 0
    }

    /// Number of registered states.
    pub fn registered_count(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    /// Ids on the stack, bottom first.
    pub fn stack_ids(&self) -> Vec<StateId> {
        self.inner.stack.borrow().iter().map(|s| s.id()).collect()
    }

    /// Snapshot of the navigation history.
    pub fn history(&self) -> NavigationHistory {
        self.inner.history.borrow().clone()
    }

    /// Diagnostics reported by this machine, oldest first.
    pub fn recent_diagnostics(&self) -> Vec<StateError> {
        self.inner.diagnostics.borrow().iter().cloned().collect()
    }

    fn registered(&self, id: StateId) -> Option<StateRef> {
        let found = self.get_state(id);
        if found.is_none() {
            self.report(StateError::UnknownStateId { id });
        }
        found
    }

    fn take_top(&self) -> Option<StateRef> {
        self.inner.stack.borrow_mut().pop()
    }

    /// Hand focus to `state` unless some state already holds it.
    fn focus(&self, state: &StateRef) {
        {
            let mut focused = self.inner.focused.borrow_mut();
            if focused.is_some() {
                return;
            }
            *focused = Some(state.clone());
        }
        dispatch(self, state.as_ref(), LifecycleEvent::Focus);
    }

    /// Take focus from `state` if it holds it.
    fn defocus(&self, state: &StateRef) {
        {
            let mut focused = self.inner.focused.borrow_mut();
            let holds = focused
                .as_ref()
                .is_some_and(|holder| std::ptr::addr_eq(Rc::as_ptr(holder), Rc::as_ptr(state)));
            if !holds {
                return;
            }
            *focused = None;
        }
        dispatch(self, state.as_ref(), LifecycleEvent::Defocus);
    }

    fn record(
        &self,
        kind: NavigationKind,
        from: Option<StateId>,
        to: Option<StateId>,
        depth: usize,
    ) {
        self.inner.history.borrow_mut().record(NavigationRecord {
            kind,
            from,
            to,
            depth,
            timestamp: Utc::now(),
        });
    }

    fn report(&self, error: StateError) {
        warn!(
            machine = %self.name(),
            machine_id = %self.inner.instance_id,
            "{error}"
        );

        let capacity = self.inner.config.diagnostics_capacity;
        if capacity == 0 {
            return;
        }
        let mut diagnostics = self.inner.diagnostics.borrow_mut();
        while diagnostics.len() >= capacity {
            diagnostics.pop_front();
        }
        diagnostics.push_back(error);
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name())
            .field("instance_id", &self.inner.instance_id)
            .field("stack", &self.stack_ids())
            .field("registered", &self.registered_count())
            .finish()
    }
}

/// Registration hook for a freshly created state.
///
/// With an owner, this is `owner.add_state(state)`. Without one the state is
/// reported as misconfigured and stays inert: it is never pushed or
/// dispatched to.
pub fn register(owner: Option<&StateMachine>, state: StateRef) -> bool {
    match owner {
        Some(machine) => machine.add_state(state),
        None => {
            let error = StateError::MissingStateMachine {
                state: state.name().to_string(),
            };
            warn!(id = %state.id(), "{error}");
            false
        }
    }
}
