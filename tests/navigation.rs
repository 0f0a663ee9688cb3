//! Integration tests driving the machine the way a UI host does: panels that
//! toggle visibility and interactivity from their hooks and navigate from
//! button and animation callbacks.

use panelstack::{
    register, state_ids, LifecycleEvent, MachineConfig, MachineLink, StateBuilder, StateError,
    StateId, StateMachine, StateMachineBuilder, StateRef, UiState,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

state_ids! {
    enum Panel {
        A = 1,
        B = 2,
        C = 3,
    }
}

type EventLog = Rc<RefCell<Vec<(Panel, LifecycleEvent)>>>;

/// A panel with a visibility flag, a button and an optional intro animation.
struct TestPanel {
    panel: Panel,
    link: MachineLink,
    log: EventLog,
    visible: Cell<bool>,
    interactable: Cell<bool>,
    animating: Cell<bool>,
    tracks_focus: bool,
}

impl TestPanel {
    fn new(panel: Panel, log: &EventLog, tracks_focus: bool) -> Rc<Self> {
        Rc::new(Self {
            panel,
            link: MachineLink::new(),
            log: log.clone(),
            visible: Cell::new(true),
            interactable: Cell::new(true),
            animating: Cell::new(false),
            tracks_focus,
        })
    }

    fn note(&self, event: LifecycleEvent) {
        self.log.borrow_mut().push((self.panel, event));
    }

    fn click(&self, navigate: impl FnOnce(&StateMachine)) {
        if let Some(machine) = self.link.machine() {
            navigate(&machine);
        }
    }

    fn finish_exit_animation(&self) {
        self.animating.set(false);
        self.click(|machine| {
            machine.pop_state();
        });
    }
}

impl UiState for TestPanel {
    fn id(&self) -> StateId {
        self.panel.into()
    }

    fn name(&self) -> &str {
        self.panel.name()
    }

    fn link(&self) -> Option<&MachineLink> {
        Some(&self.link)
    }

    fn on_awake(&self, _machine: &StateMachine) {
        self.note(LifecycleEvent::Awake);
        self.visible.set(false);
    }

    fn on_enter(&self, _machine: &StateMachine) {
        self.note(LifecycleEvent::Enter);
        self.visible.set(true);
        if self.panel == Panel::C {
            self.animating.set(true);
        }
    }

    fn on_exit(&self, _machine: &StateMachine) {
        self.note(LifecycleEvent::Exit);
        self.visible.set(false);
    }

    fn on_focus(&self, _machine: &StateMachine) {
        if self.tracks_focus {
            self.note(LifecycleEvent::Focus);
            self.interactable.set(true);
        }
    }

    fn on_defocus(&self, _machine: &StateMachine) {
        if self.tracks_focus {
            self.note(LifecycleEvent::Defocus);
            self.interactable.set(false);
        }
    }
}

struct Fixture {
    machine: StateMachine,
    log: EventLog,
    a: Rc<TestPanel>,
    b: Rc<TestPanel>,
    c: Rc<TestPanel>,
}

impl Fixture {
    fn new() -> Self {
        let log = EventLog::default();
        let a = TestPanel::new(Panel::A, &log, true);
        let b = TestPanel::new(Panel::B, &log, true);
        let c = TestPanel::new(Panel::C, &log, false);
        let machine = StateMachineBuilder::new()
            .name("Canvas")
            .initial_state(Panel::A)
            .states([
                a.clone() as StateRef,
                b.clone() as StateRef,
                c.clone() as StateRef,
            ])
            .build();
        Self {
            machine,
            log,
            a,
            b,
            c,
        }
    }

    fn drain(&self) -> Vec<(Panel, LifecycleEvent)> {
        self.log.borrow_mut().drain(..).collect()
    }
}

use LifecycleEvent::{Awake, Defocus, Enter, Exit, Focus};

#[test]
fn registration_awakes_and_hides_every_panel() {
    let fixture = Fixture::new();
    assert_eq!(
        fixture.drain(),
        vec![(Panel::A, Awake), (Panel::B, Awake), (Panel::C, Awake)]
    );
    assert!(!fixture.a.visible.get());
    assert!(!fixture.b.visible.get());
    assert!(!fixture.c.visible.get());
    assert_eq!(fixture.machine.registered_count(), 3);
}

#[test]
fn documented_scenario_dispatch_order() {
    let fixture = Fixture::new();
    let machine = &fixture.machine;
    fixture.drain();

    machine.push_state(Panel::A);
    assert_eq!(fixture.drain(), vec![(Panel::A, Enter), (Panel::A, Focus)]);

    machine.push_state(Panel::B);
    assert_eq!(
        fixture.drain(),
        vec![(Panel::A, Defocus), (Panel::B, Enter), (Panel::B, Focus)]
    );

    machine.pop_state();
    assert_eq!(
        fixture.drain(),
        vec![(Panel::B, Defocus), (Panel::B, Exit), (Panel::A, Focus)]
    );

    machine.set_state(Panel::A);
    assert_eq!(
        fixture.drain(),
        vec![
            (Panel::A, Defocus),
            (Panel::A, Exit),
            (Panel::A, Enter),
            (Panel::A, Focus),
        ]
    );
}

#[test]
fn start_shows_initial_panel() {
    let fixture = Fixture::new();
    assert!(fixture.machine.start());
    assert!(fixture.a.visible.get());
    assert!(fixture.machine.is_focused(&*fixture.a));
    assert!(fixture.a.link.is_focused(&*fixture.a));
}

#[test]
fn button_flow_between_panels() {
    let fixture = Fixture::new();
    fixture.machine.start();

    // A's button replaces the stack with B.
    fixture.a.click(|machine| {
        machine.set_state(Panel::B);
    });
    assert!(!fixture.a.visible.get());
    assert!(fixture.b.visible.get());
    assert!(fixture.b.interactable.get());

    // B's second button pushes C on top; B stays visible but inert.
    fixture.b.click(|machine| {
        machine.push_state(Panel::C);
    });
    assert!(fixture.b.visible.get());
    assert!(!fixture.b.interactable.get());
    assert!(fixture.c.visible.get());
    assert!(fixture.c.animating.get());
    assert_eq!(
        fixture.machine.stack_ids(),
        vec![StateId::from(Panel::B), StateId::from(Panel::C)]
    );

    // C pops itself once its exit animation ends.
    fixture.c.finish_exit_animation();
    assert!(!fixture.c.visible.get());
    assert!(fixture.b.interactable.get());
    assert!(fixture.machine.is_focused(&*fixture.b));
}

#[test]
fn update_reaches_only_focused_panel() {
    struct Ticker {
        id: u32,
        ticks: Cell<u32>,
    }

    impl UiState for Ticker {
        fn id(&self) -> StateId {
            StateId::new(self.id)
        }

        fn on_update(&self, _machine: &StateMachine) {
            self.ticks.set(self.ticks.get() + 1);
        }
    }

    let lower = Rc::new(Ticker {
        id: 1,
        ticks: Cell::new(0),
    });
    let upper = Rc::new(Ticker {
        id: 2,
        ticks: Cell::new(0),
    });
    let machine = StateMachine::new();
    machine.add_state(lower.clone() as StateRef);
    machine.add_state(upper.clone() as StateRef);

    machine.push_state(1);
    machine.update_tick();
    machine.push_state(2);
    machine.update_tick();
    machine.update_tick();
    machine.pop_state();
    machine.update_tick();

    assert_eq!(lower.ticks.get(), 2);
    assert_eq!(upper.ticks.get(), 2);
}

#[test]
fn focus_hook_may_push_immediately() {
    struct Redirect {
        target: StateId,
        fired: Cell<bool>,
    }

    impl UiState for Redirect {
        fn id(&self) -> StateId {
            StateId::new(100)
        }

        fn on_focus(&self, machine: &StateMachine) {
            if !self.fired.replace(true) {
                machine.push_state(self.target);
            }
        }
    }

    let fixture = Fixture::new();
    let redirect = Rc::new(Redirect {
        target: Panel::B.into(),
        fired: Cell::new(false),
    });
    fixture.machine.add_state(redirect.clone() as StateRef);
    fixture.drain();

    fixture.machine.push_state(100);

    assert_eq!(
        fixture.machine.stack_ids(),
        vec![StateId::new(100), Panel::B.into()]
    );
    assert_eq!(fixture.drain(), vec![(Panel::B, Enter), (Panel::B, Focus)]);
    assert!(fixture.machine.is_focused(&*fixture.b));
}

#[test]
fn clear_exits_every_duplicate_entry() {
    let machine = StateMachine::new();
    let exits = Rc::new(Cell::new(0));
    let counter = exits.clone();
    machine.add_state(
        StateBuilder::new(1, "Root")
            .on_exit(move |_| counter.set(counter.get() + 1))
            .into_ref(),
    );
    machine.push_state(1);
    machine.push_state(1);

    assert_eq!(machine.clear_states(), 2);
    assert_eq!(exits.get(), 2);
    assert!(machine.is_empty());
}

#[test]
fn state_without_owner_stays_inert() {
    let log = EventLog::default();
    let orphan = TestPanel::new(Panel::C, &log, true);

    assert!(!register(None, orphan.clone() as StateRef));
    assert!(log.borrow().is_empty());
    assert!(!orphan.link.is_bound());
    assert!(!orphan.link.is_focused(&*orphan));
}

#[test]
fn register_hook_binds_owner() {
    let machine = StateMachine::new();
    let log = EventLog::default();
    let panel = TestPanel::new(Panel::A, &log, true);

    assert!(register(Some(&machine), panel.clone() as StateRef));
    assert!(panel.link.is_bound());
    assert_eq!(log.borrow().as_slice(), &[(Panel::A, Awake)]);
}

#[test]
fn duplicate_panel_keeps_first_instance() {
    let fixture = Fixture::new();
    let impostor = TestPanel::new(Panel::A, &fixture.log, true);
    fixture.drain();

    assert!(!fixture.machine.add_state(impostor.clone() as StateRef));
    assert_eq!(fixture.drain(), vec![(Panel::A, Awake)]);

    fixture.machine.push_state(Panel::A);
    assert!(fixture.machine.is_focused(&*fixture.a));
    assert!(!fixture.machine.is_focused(&*impostor));
    assert!(!impostor.visible.get());
    assert!(fixture
        .machine
        .recent_diagnostics()
        .contains(&StateError::DuplicateRegistration {
            id: Panel::A.into(),
            state: "A".to_string(),
        }));
}

#[test]
fn machine_from_json_configuration() {
    let config = MachineConfig::from_json(r#"{ "name": "Hud", "initial_state": 3 }"#).unwrap();
    let log = EventLog::default();
    let c = TestPanel::new(Panel::C, &log, false);
    let machine = StateMachineBuilder::new()
        .config(config)
        .state(c.clone() as StateRef)
        .build_and_start();

    assert_eq!(machine.name(), "Hud");
    assert!(machine.is_focused(&*c));
    assert_eq!(
        log.borrow().as_slice(),
        &[(Panel::C, Awake), (Panel::C, Enter)]
    );
}

#[test]
fn history_records_the_session() {
    let fixture = Fixture::new();
    fixture.machine.start();
    fixture.machine.push_state(Panel::B);
    fixture.machine.set_state(Panel::C);

    let history = fixture.machine.history();
    assert_eq!(
        history.tops(),
        vec![
            Some(StateId::from(Panel::A)),
            Some(StateId::from(Panel::B)),
            None,
            Some(StateId::from(Panel::C)),
        ]
    );
    assert!(history.duration().is_some());
}
