//! Back-reference from a state to its owning machine.

use crate::core::UiState;
use crate::machine::{StateMachine, WeakStateMachine};
use std::cell::OnceCell;
use std::fmt;

/// Slot a state embeds to learn which machine owns it.
///
/// The machine binds the link the first time the state is handed to
/// `add_state`; later bindings are ignored. The link is weak, so a state
/// never keeps its machine alive.
///
/// # Example
///
/// ```rust
/// use panelstack::{MachineLink, StateId, StateMachine, UiState};
/// use std::rc::Rc;
///
/// struct Settings {
///     link: MachineLink,
/// }
///
/// impl Settings {
///     fn on_click_back(&self) {
///         if let Some(machine) = self.link.machine() {
///             machine.pop_state();
///         }
///     }
/// }
///
/// impl UiState for Settings {
///     fn id(&self) -> StateId {
///         StateId::new(5)
///     }
///
///     fn link(&self) -> Option<&MachineLink> {
///         Some(&self.link)
///     }
/// }
///
/// let machine = StateMachine::new();
/// let settings = Rc::new(Settings { link: MachineLink::new() });
/// machine.add_state(settings.clone() as Rc<dyn UiState>);
/// machine.push_state(StateId::new(5));
///
/// assert!(settings.link.is_focused(&*settings));
/// settings.on_click_back();
/// assert_eq!(machine.depth(), 0);
/// ```
#[derive(Default)]
pub struct MachineLink {
    owner: OnceCell<WeakStateMachine>,
}

impl MachineLink {
    /// Create an unbound link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the link was already bound.
    pub(crate) fn bind(&self, machine: &StateMachine) -> bool {
        self.owner.set(machine.downgrade()).is_ok()
    }

    /// Whether a machine has registered the owning state.
    pub fn is_bound(&self) -> bool {
        self.owner.get().is_some()
    }

    /// The owning machine, if bound and still alive.
    pub fn machine(&self) -> Option<StateMachine> {
        self.owner.get().and_then(WeakStateMachine::upgrade)
    }

    /// Whether `state` is the owning machine's current top.
    pub fn is_focused(&self, state: &dyn UiState) -> bool {
        self.machine()
            .map(|machine| machine.is_focused(state))
            .unwrap_or(false)
    }
}

impl fmt::Debug for MachineLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineLink")
            .field("bound", &self.is_bound())
            .finish()
    }
}
