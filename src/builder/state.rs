//! Closure-backed states.
//!
//! Many panels are pure wiring: show on enter, hide on exit, toggle
//! interactivity on focus. [`StateBuilder`] assembles such a state from
//! closures instead of a dedicated type.

use crate::core::{StateId, StateRef, UiState};
use crate::machine::{MachineLink, StateMachine};
use std::fmt;
use std::rc::Rc;

type Hook = Box<dyn Fn(&StateMachine)>;

/// A state whose hooks are closures. Hooks left unset are no-ops.
pub struct ClosureState {
    id: StateId,
    name: String,
    link: MachineLink,
    awake: Option<Hook>,
    enter: Option<Hook>,
    exit: Option<Hook>,
    focus: Option<Hook>,
    defocus: Option<Hook>,
    update: Option<Hook>,
}

impl ClosureState {
    /// The machine this state was registered with, if still alive.
    pub fn machine(&self) -> Option<StateMachine> {
        self.link.machine()
    }
}

fn run(hook: &Option<Hook>, machine: &StateMachine) {
    if let Some(hook) = hook {
        hook(machine);
    }
}

impl UiState for ClosureState {
    fn id(&self) -> StateId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn link(&self) -> Option<&MachineLink> {
        Some(&self.link)
    }

    fn on_awake(&self, machine: &StateMachine) {
        run(&self.awake, machine);
    }

    fn on_enter(&self, machine: &StateMachine) {
        run(&self.enter, machine);
    }

    fn on_exit(&self, machine: &StateMachine) {
        run(&self.exit, machine);
    }

    fn on_focus(&self, machine: &StateMachine) {
        run(&self.focus, machine);
    }

    fn on_defocus(&self, machine: &StateMachine) {
        run(&self.defocus, machine);
    }

    fn on_update(&self, machine: &StateMachine) {
        run(&self.update, machine);
    }
}

impl fmt::Debug for ClosureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureState")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("link", &self.link)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`ClosureState`].
///
/// # Example
///
/// ```rust
/// use panelstack::{StateBuilder, StateMachine};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let ticks = Rc::new(Cell::new(0));
/// let counter = ticks.clone();
///
/// let machine = StateMachine::new();
/// machine.add_state(
///     StateBuilder::new(1, "Gameplay HUD")
///         .on_update(move |_| counter.set(counter.get() + 1))
///         .into_ref(),
/// );
///
/// machine.push_state(1);
/// machine.update_tick();
/// machine.update_tick();
/// assert_eq!(ticks.get(), 2);
/// ```
pub struct StateBuilder {
    state: ClosureState,
}

impl StateBuilder {
    /// Create a builder for a state with no hooks.
    pub fn new(id: impl Into<StateId>, name: impl Into<String>) -> Self {
        Self {
            state: ClosureState {
                id: id.into(),
                name: name.into(),
                link: MachineLink::new(),
                awake: None,
                enter: None,
                exit: None,
                focus: None,
                defocus: None,
                update: None,
            },
        }
    }

    /// Set the awake hook.
    pub fn on_awake(mut self, hook: impl Fn(&StateMachine) + 'static) -> Self {
        self.state.awake = Some(Box::new(hook));
        self
    }

    /// Set the enter hook.
    pub fn on_enter(mut self, hook: impl Fn(&StateMachine) + 'static) -> Self {
        self.state.enter = Some(Box::new(hook));
        self
    }

    /// Set the exit hook.
    pub fn on_exit(mut self, hook: impl Fn(&StateMachine) + 'static) -> Self {
        self.state.exit = Some(Box::new(hook));
        self
    }

    /// Set the focus hook.
    pub fn on_focus(mut self, hook: impl Fn(&StateMachine) + 'static) -> Self {
        self.state.focus = Some(Box::new(hook));
        self
    }

    /// Set the defocus hook.
    pub fn on_defocus(mut self, hook: impl Fn(&StateMachine) + 'static) -> Self {
        self.state.defocus = Some(Box::new(hook));
        self
    }

    /// Set the update hook.
    pub fn on_update(mut self, hook: impl Fn(&StateMachine) + 'static) -> Self {
        self.state.update = Some(Box::new(hook));
        self
    }

    /// Build the state.
    pub fn build(self) -> Rc<ClosureState> {
        Rc::new(self.state)
    }

    /// Build straight into a type-erased handle for `add_state`.
    pub fn into_ref(self) -> StateRef {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn unset_hooks_are_no_ops() {
        let machine = StateMachine::new();
        machine.add_state(StateBuilder::new(1, "Empty").into_ref());
        assert!(machine.push_state(1));
        assert!(machine.update_tick());
        assert!(machine.pop_state().is_some());
    }

    #[test]
    fn hooks_fire_with_the_owning_machine() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let machine = StateMachine::new();

        let log = |label: &'static str| {
            let seen = seen.clone();
            move |m: &StateMachine| seen.borrow_mut().push((label, m.depth()))
        };

        machine.add_state(
            StateBuilder::new(1, "Logged")
                .on_awake(log("awake"))
                .on_enter(log("enter"))
                .on_focus(log("focus"))
                .on_defocus(log("defocus"))
                .on_exit(log("exit"))
                .into_ref(),
        );
        machine.push_state(1);
        machine.pop_state();

        assert_eq!(
            *seen.borrow(),
            vec![
                ("awake", 0),
                ("enter", 1),
                ("focus", 1),
                ("defocus", 0),
                ("exit", 0),
            ]
        );
    }

    #[test]
    fn closure_state_is_linked_on_registration() {
        let machine = StateMachine::new();
        let state = StateBuilder::new(3, "Linked").build();
        assert!(state.machine().is_none());

        machine.add_state(state.clone() as StateRef);
        assert!(state.machine().is_some());
        assert_eq!(state.name(), "Linked");
    }

    #[test]
    fn debug_output_lists_identity() {
        let state = StateBuilder::new(4, "Pause").build();
        let rendered = format!("{state:?}");
        assert!(rendered.contains("Pause"));
        assert!(rendered.contains("ClosureState"));
    }
}
