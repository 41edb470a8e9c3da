//! The transition controller.

use super::error::{FsmError, Hook};
use super::host::{EventSink, HostEvent};
use super::registry::StateRegistry;
use crate::config::{short_type_name, FailurePolicy, MachineConfig};
use crate::core::{Context, EntityHandle, HookResult, InputEvent, State};
use crate::report::{Report, Reporter, TracingReporter};
use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

/// Upper bound on switches requested back-to-back from `on_enter` hooks.
pub const MAX_CHAINED_TRANSITIONS: usize = 16;

/// Lifecycle of a machine as seen from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineStatus {
    /// `initialize` has not been called yet.
    Uninitialized,
    /// Initialized; the default state starts on the next deferred pass.
    Pending,
    /// Configuration error. No state is active and forwarding is a no-op.
    Inert,
    /// A state is active.
    Running,
    /// The last transition failed to resolve its target.
    Degraded,
}

/// Owns the active state, performs transitions and forwards host events.
///
/// States are registered up front; the machine only ever points at one of
/// them. Events delivered while no state is active are dropped silently.
/// Every fault raised by a state, whether an `Err` or a panic, is caught
/// here and handed to the machine's [`Reporter`].
///
/// # Example
///
/// ```rust
/// use entity_fsm::builder::StateMachineBuilder;
/// use entity_fsm::core::{Context, HookResult, State};
/// use entity_fsm::runtime::StateMachine;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// struct Lamp {
///     lit: bool,
/// }
///
/// struct Off;
/// impl State<Lamp> for Off {
///     fn on_update(&mut self, ctx: &mut Context<'_, Lamp>, _delta: f64) -> HookResult {
///         ctx.switch_to("On");
///         Ok(())
///     }
/// }
///
/// struct On;
/// impl State<Lamp> for On {
///     fn on_enter(&mut self, ctx: &mut Context<'_, Lamp>) -> HookResult {
///         ctx.with_entity(|lamp| lamp.lit = true);
///         Ok(())
///     }
/// }
///
/// let lamp = Rc::new(RefCell::new(Lamp { lit: false }));
/// let mut machine: StateMachine<Lamp> = StateMachineBuilder::new()
///     .default_state("Off")
///     .state("Off", Off)
///     .state("On", On)
///     .build()
///     .unwrap();
///
/// machine.initialize(Some(&lamp), None);
/// machine.on_logic_tick(0.016);
///
/// assert_eq!(machine.current_state_name(), Some("On"));
/// assert!(lamp.borrow().lit);
/// ```
pub struct StateMachine<T: 'static, E: 'static = InputEvent> {
    entity_name: String,
    default_state: Option<String>,
    failure_policy: FailurePolicy,
    registry: StateRegistry<T, E>,
    entity: Option<Weak<RefCell<T>>>,
    active: Option<usize>,
    pending: Option<String>,
    status: MachineStatus,
    reporter: Box<dyn Reporter>,
}

impl<T: 'static, E: 'static> StateMachine<T, E> {
    /// Create a machine over `registry` with default configuration,
    /// reporting through `tracing`.
    pub fn new(registry: StateRegistry<T, E>) -> Self {
        Self::with_config(MachineConfig::default(), registry, Box::new(TracingReporter))
    }

    pub fn with_config(
        config: MachineConfig,
        registry: StateRegistry<T, E>,
        reporter: Box<dyn Reporter>,
    ) -> Self {
        Self {
            entity_name: config.entity_name.unwrap_or_else(short_type_name::<T>),
            default_state: config.default_state,
            failure_policy: config.failure_policy,
            registry,
            entity: None,
            active: None,
            pending: None,
            status: MachineStatus::Uninitialized,
            reporter,
        }
    }

    /// Record the controlled entity and schedule the default state.
    ///
    /// The machine keeps only a weak reference to `entity`. Activation is
    /// deferred to [`process_deferred`](Self::process_deferred), which every
    /// forwarding entry point runs first, so the host can finish assembling
    /// its states before the first `on_enter` fires. `default_state`
    /// overrides the configured default.
    ///
    /// Without an entity, or without a default state that resolves to a
    /// registered state, a configuration error is reported and the machine
    /// stays inert. A state that was active is exited and unbound first.
    pub fn initialize(&mut self, entity: Option<&Rc<RefCell<T>>>, default_state: Option<&str>) {
        self.pending = None;

        let Some(entity) = entity else {
            self.shut_down();
            self.entity = None;
            self.report_error(FsmError::MissingEntity);
            return;
        };
        self.entity = Some(Rc::downgrade(entity));

        let default_state = default_state
            .map(str::to_owned)
            .or_else(|| self.default_state.clone());
        let Some(name) = default_state else {
            self.shut_down();
            self.report_error(FsmError::MissingDefaultState);
            return;
        };
        if let Err(reason) = self.registry.resolve(&name) {
            self.shut_down();
            self.report_error(FsmError::UnknownDefaultState { name, reason });
            return;
        }

        self.pending = Some(name);
        self.status = MachineStatus::Pending;
    }

    /// Deactivate whatever is active and go inert.
    fn shut_down(&mut self) {
        if let Some(slot) = self.active.take() {
            if self.status != MachineStatus::Degraded {
                self.deactivate(slot);
            }
        }
        self.status = MachineStatus::Inert;
    }

    /// Run the activation scheduled by `initialize`, if any.
    ///
    /// Returns `true` when an activation was attempted.
    pub fn process_deferred(&mut self) -> bool {
        match self.pending.take() {
            Some(name) => {
                // Failures are already reported.
                let _ = self.switch_to(&name);
                true
            }
            None => false,
        }
    }

    /// Transition to the state registered as `name`.
    ///
    /// Runs the active state's `on_exit`, resolves `name`, then binds and
    /// enters the new state, all before returning. If `name` does not
    /// resolve to a state the error is reported and returned, no `on_enter`
    /// runs, and the machine becomes [`MachineStatus::Degraded`] with its
    /// active reference handled according to its [`FailurePolicy`].
    ///
    /// An explicit switch replaces a default state still waiting for the
    /// deferred pass. A switch requested from the new state's `on_enter` is
    /// followed immediately, up to [`MAX_CHAINED_TRANSITIONS`] times.
    pub fn switch_to(&mut self, name: &str) -> Result<(), FsmError> {
        if self.entity.is_none() {
            return Err(self.report_error(FsmError::MissingEntity));
        }
        self.pending = None;

        let mut target = name.to_owned();
        for _ in 0..MAX_CHAINED_TRANSITIONS {
            match self.transition(&target)? {
                Some(next) => target = next,
                None => return Ok(()),
            }
        }

        Err(self.report_error(FsmError::TransitionChainTooLong {
            name: target,
            limit: MAX_CHAINED_TRANSITIONS,
        }))
    }

    /// One exit-resolve-enter step. Returns a switch requested by `on_enter`.
    fn transition(&mut self, name: &str) -> Result<Option<String>, FsmError> {
        // A stale state left by a failed switch has already exited.
        if let Some(current) = self.active {
            if self.status != MachineStatus::Degraded {
                self.deactivate(current);
            }
        }

        let slot = match self.registry.resolve(name) {
            Ok(slot) => slot,
            Err(reason) => {
                if self.failure_policy == FailurePolicy::Clear {
                    self.active = None;
                }
                self.status = MachineStatus::Degraded;
                return Err(self.report_error(FsmError::Transition {
                    name: name.to_owned(),
                    reason,
                }));
            }
        };

        self.active = Some(slot);
        self.status = MachineStatus::Running;
        Ok(self.activate(slot))
    }

    fn deactivate(&mut self, slot: usize) {
        if let Some(target) = self.invoke(slot, Hook::Exit, |state, ctx| state.on_exit(ctx)) {
            let state = self.registry.name(slot).unwrap_or_default().to_owned();
            self.report_warning(FsmError::ReentrantSwitch { state, target });
        }
        if let Some((_, state)) = self.registry.state_mut(slot) {
            state.unbind();
        }
    }

    /// Log, bind, then enter the state at `slot`.
    fn activate(&mut self, slot: usize) -> Option<String> {
        let name = self.registry.name(slot)?.to_owned();
        self.reporter.report(Report::Transition {
            entity: self.entity_name.clone(),
            state: name.clone(),
        });

        match self.entity.as_ref().and_then(Weak::upgrade) {
            Some(entity) => {
                let handle: EntityHandle = entity;
                let bound = self
                    .registry
                    .state_mut(slot)
                    .map(|(_, state)| state.bind(&handle));
                if let Some(Err(source)) = bound {
                    self.report_warning(FsmError::Bind {
                        state: name,
                        source,
                    });
                }
            }
            None => {
                self.report_warning(FsmError::EntityReleased { state: name });
            }
        }

        self.invoke(slot, Hook::Enter, |state, ctx| state.on_enter(ctx))
    }

    /// Call one hook on the state at `slot`, isolating any fault.
    ///
    /// Returns the switch the hook requested, unless it faulted.
    fn invoke<F>(&mut self, slot: usize, hook: Hook, f: F) -> Option<String>
    where
        F: FnOnce(&mut (dyn State<T, E> + 'static), &mut Context<'_, T>) -> HookResult,
    {
        let entity = self.entity.as_ref().and_then(Weak::upgrade);
        let (name, state) = self.registry.state_mut(slot)?;
        let mut ctx = Context::new(entity, name);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| f(state, &mut ctx)));
        let requested = ctx.take_requested_switch();

        let fault = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(err.message().to_owned()),
            Err(payload) => Some(panic_message(payload.as_ref())),
        }
        .map(|message| FsmError::StateFault {
            state: name.to_owned(),
            hook,
            message,
        });

        match fault {
            Some(err) => {
                self.report_error(err);
                None
            }
            None => requested,
        }
    }

    fn forward<F>(&mut self, hook: Hook, f: F)
    where
        F: FnOnce(&mut (dyn State<T, E> + 'static), &mut Context<'_, T>) -> HookResult,
    {
        self.process_deferred();

        let Some(slot) = self.active else {
            return;
        };
        if let Some(target) = self.invoke(slot, hook, f) {
            // Failures are already reported.
            let _ = self.switch_to(&target);
        }
    }

    /// Forward a logic tick to the active state's `on_update`.
    pub fn on_logic_tick(&mut self, delta: f64) {
        self.forward(Hook::Update, |state, ctx| state.on_update(ctx, delta));
    }

    /// Forward a physics tick to the active state's `on_physics_update`.
    pub fn on_physics_tick(&mut self, delta: f64) {
        self.forward(Hook::PhysicsUpdate, |state, ctx| {
            state.on_physics_update(ctx, delta)
        });
    }

    pub fn on_input(&mut self, event: &E) {
        self.forward(Hook::Input, |state, ctx| state.on_input_event(ctx, event));
    }

    pub fn on_unhandled_input(&mut self, event: &E) {
        self.forward(Hook::UnhandledInput, |state, ctx| {
            state.on_unhandled_input_event(ctx, event)
        });
    }

    pub fn on_unhandled_key_input(&mut self, event: &E) {
        self.forward(Hook::UnhandledKeyInput, |state, ctx| {
            state.on_unhandled_key_event(ctx, event)
        });
    }

    /// Route a host event to the matching forwarding entry point.
    pub fn dispatch(&mut self, event: HostEvent<E>) {
        match event {
            HostEvent::LogicTick(delta) => self.on_logic_tick(delta),
            HostEvent::PhysicsTick(delta) => self.on_physics_tick(delta),
            HostEvent::Input(event) => self.on_input(&event),
            HostEvent::UnhandledInput(event) => self.on_unhandled_input(&event),
            HostEvent::UnhandledKeyInput(event) => self.on_unhandled_key_input(&event),
        }
    }

    /// Dispatch a frame's worth of events in delivery order.
    pub fn run_frame<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = HostEvent<E>>,
    {
        for event in events {
            self.dispatch(event);
        }
    }

    /// The active state, if any.
    pub fn current_state(&self) -> Option<&dyn State<T, E>> {
        self.active.and_then(|slot| self.registry.state(slot))
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.active.and_then(|slot| self.registry.name(slot))
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    /// The controlled entity, if initialized and still alive.
    pub fn entity(&self) -> Option<Rc<RefCell<T>>> {
        self.entity.as_ref().and_then(Weak::upgrade)
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn default_state(&self) -> Option<&str> {
        self.default_state.as_deref()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn registry(&self) -> &StateRegistry<T, E> {
        &self.registry
    }

    pub fn set_reporter(&mut self, reporter: Box<dyn Reporter>) {
        self.reporter = reporter;
    }

    fn report_error(&mut self, err: FsmError) -> FsmError {
        self.reporter.report(Report::Error(err.clone()));
        err
    }

    fn report_warning(&mut self, err: FsmError) {
        self.reporter.report(Report::Warning(err));
    }
}

impl<T: 'static, E: 'static> EventSink<E> for StateMachine<T, E> {
    fn deliver(&mut self, event: HostEvent<E>) {
        self.dispatch(event);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
