//! Lifecycle hook dispatch.

use crate::core::{LifecycleEvent, UiState};
use crate::machine::StateMachine;
use tracing::trace;

/// Invoke the hook matching `event` on `state`.
///
/// Callers must not hold any borrow of the machine's internals: the hook may
/// navigate re-entrantly.
pub(crate) fn dispatch(machine: &StateMachine, state: &dyn UiState, event: LifecycleEvent) {
    trace!(
        machine = %machine.name(),
        state = %state.name(),
        id = %state.id(),
        %event,
        "dispatching lifecycle hook"
    );

    match event {
        LifecycleEvent::Awake => state.on_awake(machine),
        LifecycleEvent::Enter => state.on_enter(machine),
        LifecycleEvent::Exit => state.on_exit(machine),
        LifecycleEvent::Focus => state.on_focus(machine),
        LifecycleEvent::Defocus => state.on_defocus(machine),
        LifecycleEvent::Update => state.on_update(machine),
    }
}
