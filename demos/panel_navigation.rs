//! Panel Navigation
//!
//! This example drives three panels the way a UI host would.
//!
//! Key concepts:
//! - Panels hide themselves on awake and show on enter/exit
//! - Focus toggles interactivity while another panel sits on top
//! - Buttons and animation callbacks navigate through the `MachineLink`
//! - The host calls `update_tick()` once per frame
//!
//! Run with: cargo run --example panel_navigation

use panelstack::{
    state_ids, MachineLink, StateId, StateMachine, StateMachineBuilder, StateRef, UiState,
};
use std::cell::Cell;
use std::rc::Rc;

state_ids! {
    enum Screen {
        Title = 1,
        Lobby = 2,
        Loadout = 3,
    }
}

struct Panel {
    screen: Screen,
    link: MachineLink,
    visible: Cell<bool>,
    interactable: Cell<bool>,
    frames: Cell<u32>,
}

impl Panel {
    fn new(screen: Screen) -> Rc<Self> {
        Rc::new(Self {
            screen,
            link: MachineLink::new(),
            visible: Cell::new(false),
            interactable: Cell::new(false),
            frames: Cell::new(0),
        })
    }

    fn click(&self, label: &str, navigate: impl FnOnce(&StateMachine)) {
        if !self.interactable.get() {
            println!("  [{}] '{}' ignored, panel is not interactable", self.name(), label);
            return;
        }
        println!("  [{}] clicked '{}'", self.name(), label);
        if let Some(machine) = self.link.machine() {
            navigate(&machine);
        }
    }
}

impl UiState for Panel {
    fn id(&self) -> StateId {
        self.screen.id()
    }

    fn name(&self) -> &str {
        self.screen.name()
    }

    fn link(&self) -> Option<&MachineLink> {
        Some(&self.link)
    }

    fn on_awake(&self, _machine: &StateMachine) {
        self.visible.set(false);
    }

    fn on_enter(&self, _machine: &StateMachine) {
        self.visible.set(true);
        self.frames.set(0);
        println!("  {} shown", self.name());
    }

    fn on_exit(&self, _machine: &StateMachine) {
        self.visible.set(false);
        println!("  {} hidden", self.name());
    }

    fn on_focus(&self, _machine: &StateMachine) {
        // The loadout panel only becomes interactable once its intro ends.
        if self.screen != Screen::Loadout {
            self.interactable.set(true);
        }
    }

    fn on_defocus(&self, _machine: &StateMachine) {
        self.interactable.set(false);
    }

    fn on_update(&self, _machine: &StateMachine) {
        self.frames.set(self.frames.get() + 1);
        if self.screen == Screen::Loadout && self.frames.get() == 3 {
            println!("  {} intro animation finished", self.name());
            self.interactable.set(true);
        }
    }
}

fn describe(machine: &StateMachine) {
    let stack: Vec<String> = machine
        .stack_ids()
        .into_iter()
        .filter_map(|id| machine.get_state(id))
        .map(|state| state.name().to_string())
        .collect();
    println!("Stack: {:?}\n", stack);
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Panel Navigation Example ===\n");

    let title = Panel::new(Screen::Title);
    let lobby = Panel::new(Screen::Lobby);
    let loadout = Panel::new(Screen::Loadout);

    let machine = StateMachineBuilder::new()
        .name("MainCanvas")
        .initial_state(Screen::Title)
        .states([
            title.clone() as StateRef,
            lobby.clone() as StateRef,
            loadout.clone() as StateRef,
        ])
        .build_and_start();
    describe(&machine);

    title.click("Play", |m| {
        m.set_state(Screen::Lobby);
    });
    describe(&machine);

    lobby.click("Loadout", |m| {
        m.push_state(Screen::Loadout);
    });
    lobby.click("Back", |m| {
        m.set_state(Screen::Title);
    });
    loadout.click("Done", |m| {
        m.pop_state();
    });

    for _ in 0..3 {
        machine.update_tick();
    }

    loadout.click("Done", |m| {
        m.pop_state();
    });
    describe(&machine);

    println!("Navigation history:");
    for record in machine.history().records() {
        println!(
            "  {:?}: {:?} -> {:?} (depth {})",
            record.kind, record.from, record.to, record.depth
        );
    }

    println!("\n=== Example Complete ===");
}
