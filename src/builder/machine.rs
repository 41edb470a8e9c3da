//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::{FailurePolicy, MachineConfig};
use crate::core::{InputEvent, State};
use crate::report::{Reporter, TracingReporter};
use crate::runtime::{RegistryError, ResolveError, StateMachine, StateRegistry};
use std::any::Any;

/// Builder for constructing state machines with a fluent API.
///
/// Registration errors are kept and surfaced by [`build`](Self::build), so
/// the chain never has to be broken up.
pub struct StateMachineBuilder<T: 'static, E: 'static = InputEvent> {
    config: MachineConfig,
    registry: StateRegistry<T, E>,
    reporter: Option<Box<dyn Reporter>>,
    error: Option<BuildError>,
}

impl<T: 'static, E: 'static> StateMachineBuilder<T, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            registry: StateRegistry::new(),
            reporter: None,
            error: None,
        }
    }

    /// Replace the whole configuration, e.g. one loaded from JSON.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Name used in transition traces.
    pub fn entity_name(mut self, name: impl Into<String>) -> Self {
        self.config.entity_name = Some(name.into());
        self
    }

    /// State started by `initialize` when it is given no other.
    pub fn default_state(mut self, name: impl Into<String>) -> Self {
        self.config.default_state = Some(name.into());
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Send diagnostics to `reporter` instead of `tracing`.
    pub fn reporter<R: Reporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Register a state under `name`.
    pub fn state<S>(mut self, name: impl Into<String>, state: S) -> Self
    where
        S: State<T, E> + 'static,
    {
        let result = self.registry.insert_state(name, state);
        self.keep_first_error(result);
        self
    }

    /// Register a non-state node under `name`.
    pub fn node<N: Any>(mut self, name: impl Into<String>, node: N) -> Self {
        let result = self.registry.insert_node(name, node);
        self.keep_first_error(result);
        self
    }

    fn keep_first_error(&mut self, result: Result<usize, RegistryError>) {
        if let Err(err) = result {
            self.error.get_or_insert(err.into());
        }
    }

    /// Build the state machine.
    /// Returns an error if a registration failed or the default state is
    /// not a registered state.
    pub fn build(self) -> Result<StateMachine<T, E>, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        if let Some(default) = &self.config.default_state {
            match self.registry.resolve(default) {
                Ok(_) => {}
                Err(ResolveError::NotFound) => {
                    return Err(BuildError::UnknownDefaultState(default.clone()))
                }
                Err(ResolveError::TypeMismatch { .. }) => {
                    return Err(BuildError::DefaultIsNotAState(default.clone()))
                }
            }
        }

        let reporter = self
            .reporter
            .unwrap_or_else(|| Box::new(TracingReporter));
        Ok(StateMachine::with_config(self.config, self.registry, reporter))
    }
}

impl<T: 'static, E: 'static> Default for StateMachineBuilder<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use crate::runtime::MachineStatus;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Player;

    struct Idle;
    impl State<Player> for Idle {}

    struct Moving;
    impl State<Player> for Moving {}

    #[test]
    fn builder_validates_default_state() {
        let result = StateMachineBuilder::<Player>::new()
            .default_state("Idle")
            .state("Moving", Moving)
            .build();

        assert!(matches!(result, Err(BuildError::UnknownDefaultState(name)) if name == "Idle"));
    }

    #[test]
    fn builder_rejects_node_as_default_state() {
        let result = StateMachineBuilder::<Player>::new()
            .default_state("Sprite")
            .node("Sprite", "player.png")
            .build();

        assert!(matches!(result, Err(BuildError::DefaultIsNotAState(_))));
    }

    #[test]
    fn builder_reports_first_registration_error() {
        let result = StateMachineBuilder::<Player>::new()
            .state("Idle", Idle)
            .state("Idle", Moving)
            .state("", Moving)
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Registry(RegistryError::DuplicateName(name))) if name == "Idle"
        ));
    }

    #[test]
    fn builder_allows_missing_default_state() {
        let machine = StateMachineBuilder::<Player>::new()
            .state("Idle", Idle)
            .build()
            .unwrap();

        assert!(machine.default_state().is_none());
        assert_eq!(machine.status(), MachineStatus::Uninitialized);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let recorder = RecordingReporter::new();
        let mut machine = StateMachineBuilder::<Player>::new()
            .entity_name("Knight")
            .default_state("Idle")
            .failure_policy(FailurePolicy::Clear)
            .reporter(recorder.clone())
            .state("Idle", Idle)
            .state("Moving", Moving)
            .build()
            .unwrap();

        let player = Rc::new(RefCell::new(Player));
        machine.initialize(Some(&player), None);
        machine.process_deferred();

        assert_eq!(machine.entity_name(), "Knight");
        assert_eq!(machine.failure_policy(), FailurePolicy::Clear);
        assert_eq!(machine.current_state_name(), Some("Idle"));
        assert_eq!(recorder.transitions(), vec!["Knight state start Idle"]);
    }

    #[test]
    fn config_is_applied_wholesale() {
        let config = MachineConfig::from_json(
            r#"{ "entity_name": "Knight", "default_state": "Moving" }"#,
        )
        .unwrap();

        let machine = StateMachineBuilder::<Player>::new()
            .config(config)
            .state("Idle", Idle)
            .state("Moving", Moving)
            .build()
            .unwrap();

        assert_eq!(machine.default_state(), Some("Moving"));
        assert_eq!(machine.registry().len(), 2);
    }
}
