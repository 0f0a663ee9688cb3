//! Core state types for the navigation machine.
//!
//! A state is one navigable UI unit (a screen, panel or overlay). Every
//! lifecycle hook on [`UiState`] has a no-op default, so a concrete state
//! implements exactly the subset of hooks it cares about.

use crate::machine::{MachineLink, StateMachine};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Stable identifier of a state variant.
///
/// Ids are unique per machine: the first state registered under an id owns it.
///
/// # Example
///
/// ```rust
/// use panelstack::StateId;
///
/// const MAIN_MENU: StateId = StateId::new(1);
/// assert_eq!(MAIN_MENU.get(), 1);
/// assert_eq!(StateId::from(1), MAIN_MENU);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(u32);

impl StateId {
    /// Wrap a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for StateId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for states managed by a [`StateMachine`].
///
/// Hooks take `&self` and receive the owning machine, so a hook may navigate
/// immediately (an `on_enter` that calls `pop_state` is fine). States that
/// need mutable data keep it behind `Cell`/`RefCell`.
///
/// # Hook order
///
/// - `on_awake`: once per `add_state` call, right after registration
/// - `on_enter`: the state was pushed and is the new top
/// - `on_focus`: the state became the top, freshly pushed or re-exposed by a pop
/// - `on_defocus`: the state stops being the top
/// - `on_exit`: the state left the stack
/// - `on_update`: once per tick while the state is the top
///
/// # Example
///
/// ```rust
/// use panelstack::{StateId, StateMachine, UiState};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// struct Inventory {
///     visible: Cell<bool>,
/// }
///
/// impl UiState for Inventory {
///     fn id(&self) -> StateId {
///         StateId::new(7)
///     }
///
///     fn name(&self) -> &str {
///         "Inventory"
///     }
///
///     fn on_enter(&self, _machine: &StateMachine) {
///         self.visible.set(true);
///     }
///
///     fn on_exit(&self, _machine: &StateMachine) {
///         self.visible.set(false);
///     }
/// }
///
/// let machine = StateMachine::new();
/// let inventory = Rc::new(Inventory { visible: Cell::new(false) });
/// machine.add_state(inventory.clone() as Rc<dyn UiState>);
///
/// machine.push_state(StateId::new(7));
/// assert!(inventory.visible.get());
/// assert!(machine.is_focused(&*inventory));
/// ```
pub trait UiState {
    /// The id this state is registered under. Must never change.
    fn id(&self) -> StateId;

    /// Human-readable label for logs and tooling.
    fn name(&self) -> &str {
        "State"
    }

    /// Back-reference slot the machine binds on registration.
    ///
    /// States that navigate from outside their hooks (button handlers,
    /// animation callbacks) embed a [`MachineLink`] and return it here.
    fn link(&self) -> Option<&MachineLink> {
        None
    }

    /// Called on every `add_state` with this state.
    fn on_awake(&self, _machine: &StateMachine) {}

    /// Called when the state is pushed.
    fn on_enter(&self, _machine: &StateMachine) {}

    /// Called when the state leaves the stack.
    fn on_exit(&self, _machine: &StateMachine) {}

    /// Called when the state becomes the focused top.
    fn on_focus(&self, _machine: &StateMachine) {}

    /// Called when the state loses focus.
    fn on_defocus(&self, _machine: &StateMachine) {}

    /// Called once per tick while the state is the top.
    fn on_update(&self, _machine: &StateMachine) {}
}

/// Shared handle to a registered state. The host keeps ownership; the
/// machine only holds references.
pub type StateRef = Rc<dyn UiState>;

/// The six lifecycle notifications a machine can dispatch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LifecycleEvent {
    Awake,
    Enter,
    Exit,
    Focus,
    Defocus,
    Update,
}

impl LifecycleEvent {
    /// Every event, in declaration order.
    pub const ALL: [LifecycleEvent; 6] = [
        Self::Awake,
        Self::Enter,
        Self::Exit,
        Self::Focus,
        Self::Defocus,
        Self::Update,
    ];

    /// The event name, as logged.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Awake => "Awake",
            Self::Enter => "Enter",
            Self::Exit => "Exit",
            Self::Focus => "Focus",
            Self::Defocus => "Defocus",
            Self::Update => "Update",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
