//! Property-based tests for state machine transitions.
//!
//! These tests use proptest to verify that the lifecycle guarantees hold
//! across randomly generated transition sequences.

use entity_fsm::builder::StateMachineBuilder;
use entity_fsm::core::{Context, HookResult, State};
use entity_fsm::report::RecordingReporter;
use entity_fsm::runtime::{FsmError, MachineStatus, StateMachine};
use entity_fsm::FailurePolicy;
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const NAMES: [&str; 4] = ["Idle", "Walking", "Running", "Jumping"];

type Journal = Rc<RefCell<Vec<(&'static str, &'static str)>>>;

struct Character;

struct Tracked {
    name: &'static str,
    journal: Journal,
}

impl State<Character> for Tracked {
    fn on_enter(&mut self, _ctx: &mut Context<'_, Character>) -> HookResult {
        self.journal.borrow_mut().push((self.name, "enter"));
        Ok(())
    }

    fn on_exit(&mut self, _ctx: &mut Context<'_, Character>) -> HookResult {
        self.journal.borrow_mut().push((self.name, "exit"));
        Ok(())
    }
}

fn machine(policy: FailurePolicy) -> (StateMachine<Character>, Journal, RecordingReporter, Rc<RefCell<Character>>) {
    let journal = Journal::default();
    let recorder = RecordingReporter::new();
    let mut builder = StateMachineBuilder::new()
        .default_state("Idle")
        .failure_policy(policy)
        .reporter(recorder.clone());
    for name in NAMES {
        builder = builder.state(
            name,
            Tracked {
                name,
                journal: journal.clone(),
            },
        );
    }
    let mut machine = builder.build().unwrap();
    let character = Rc::new(RefCell::new(Character));
    machine.initialize(Some(&character), None);
    machine.process_deferred();
    journal.borrow_mut().clear();
    (machine, journal, recorder, character)
}

prop_compose! {
    fn arbitrary_name()(index in 0..NAMES.len()) -> &'static str {
        NAMES[index]
    }
}

prop_compose! {
    fn arbitrary_target()(valid in any::<bool>(), index in 0..NAMES.len()) -> Option<&'static str> {
        valid.then(|| NAMES[index])
    }
}

proptest! {
    #[test]
    fn valid_switches_keep_exactly_one_active_state(
        targets in prop::collection::vec(arbitrary_name(), 1..20)
    ) {
        let (mut machine, journal, recorder, _character) = machine(FailurePolicy::KeepStale);
        let mut previous = "Idle";

        for target in targets {
            prop_assert!(machine.switch_to(target).is_ok());
            prop_assert_eq!(machine.current_state_name(), Some(target));
            prop_assert_eq!(machine.status(), MachineStatus::Running);

            let calls: Vec<_> = journal.borrow_mut().drain(..).collect();
            prop_assert_eq!(calls, vec![(previous, "exit"), (target, "enter")]);
            previous = target;
        }

        prop_assert!(recorder.errors().is_empty());
    }

    #[test]
    fn failed_switches_never_enter_a_state(
        targets in prop::collection::vec(arbitrary_target(), 1..20),
        clear in any::<bool>()
    ) {
        let policy = if clear { FailurePolicy::Clear } else { FailurePolicy::KeepStale };
        let (mut machine, journal, recorder, _character) = machine(policy);
        let mut failures = 0;

        for target in targets {
            let before = machine.current_state_name().map(str::to_owned);
            match target {
                Some(name) => {
                    prop_assert!(machine.switch_to(name).is_ok());
                    prop_assert_eq!(machine.current_state_name(), Some(name));
                }
                None => {
                    failures += 1;
                    let result = machine.switch_to("Nonexistent");
                    let is_transition_error = matches!(result, Err(FsmError::Transition { .. }));
                    prop_assert!(is_transition_error);
                    prop_assert_eq!(machine.status(), MachineStatus::Degraded);
                    if clear {
                        prop_assert!(machine.current_state_name().is_none());
                    } else {
                        prop_assert_eq!(machine.current_state_name().map(str::to_owned), before);
                    }
                    let entered = journal.borrow().iter().any(|(_, hook)| *hook == "enter");
                    prop_assert!(!entered);
                }
            }
            journal.borrow_mut().clear();
        }

        prop_assert_eq!(recorder.errors().len(), failures);
    }

    #[test]
    fn enter_and_exit_stay_balanced(
        targets in prop::collection::vec(arbitrary_name(), 0..30)
    ) {
        let (mut machine, journal, _recorder, _character) = machine(FailurePolicy::KeepStale);

        for target in &targets {
            machine.switch_to(target).unwrap();
            machine.on_logic_tick(0.016);
        }

        let calls = journal.borrow();
        let enters = calls.iter().filter(|(_, hook)| *hook == "enter").count();
        let exits = calls.iter().filter(|(_, hook)| *hook == "exit").count();
        prop_assert_eq!(enters, targets.len());
        prop_assert_eq!(exits, targets.len());
    }

    #[test]
    fn each_activation_exits_at_most_once(
        targets in prop::collection::vec(arbitrary_target(), 1..30),
        clear in any::<bool>()
    ) {
        let policy = if clear { FailurePolicy::Clear } else { FailurePolicy::KeepStale };
        let (mut machine, journal, _recorder, _character) = machine(policy);

        for target in targets {
            let _ = machine.switch_to(target.unwrap_or("Nonexistent"));
            machine.on_logic_tick(0.016);
        }

        let calls = journal.borrow();
        let double_exit = calls
            .windows(2)
            .any(|pair| pair[0].1 == "exit" && pair[1].1 == "exit");
        prop_assert!(!double_exit, "a state exited twice: {:?}", *calls);
        let enters = calls.iter().filter(|(_, hook)| *hook == "enter").count();
        let exits = calls.iter().filter(|(_, hook)| *hook == "exit").count();
        prop_assert!(exits <= enters + 1);
    }
}
