//! Closure States
//!
//! This example builds states from closures instead of dedicated types and
//! shows how misconfiguration is reported without failing.
//!
//! Key concepts:
//! - `StateBuilder` wires hooks from closures
//! - Machine configuration loaded from JSON
//! - Unknown ids and duplicate registrations end up in the diagnostics buffer
//!
//! Run with: cargo run --example closure_states

use panelstack::{MachineConfig, StateBuilder, StateMachine};

fn panel(id: u32, name: &'static str) -> panelstack::StateRef {
    StateBuilder::new(id, name)
        .on_enter(move |m| println!("  enter {name} (depth {})", m.depth()))
        .on_exit(move |_| println!("  exit {name}"))
        .on_focus(move |_| println!("  focus {name}"))
        .on_defocus(move |_| println!("  defocus {name}"))
        .into_ref()
}

fn main() {
    tracing_subscriber::fmt().init();

    println!("=== Closure States Example ===\n");

    let config = match MachineConfig::from_json(r#"{ "name": "Pause", "initial_state": 1 }"#) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return;
        }
    };
    let machine = StateMachine::with_config(config);
    machine.add_state(panel(1, "PauseMenu"));
    machine.add_state(panel(2, "Settings"));
    machine.add_state(panel(2, "SettingsCopy"));

    machine.start();
    machine.push_state(2);
    machine.push_state(42);
    machine.pop_state();
    machine.set_state(1);

    println!("\nDiagnostics:");
    for error in machine.recent_diagnostics() {
        println!("  {error}");
    }

    println!("\n=== Example Complete ===");
}
