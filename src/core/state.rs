//! The capability set every concrete state implements.
//!
//! A state is a named, swappable unit of behavior bound to one controlled
//! entity while it is active. Every hook has a no-op default, so a concrete
//! state only implements the callbacks it actually needs.

use super::binding::{BindError, EntityHandle};
use super::context::Context;
use super::input::InputEvent;
use thiserror::Error;

/// Error raised by a state hook.
///
/// Returning `Err` from a hook is the way a state signals a fault. The
/// machine catches it at its boundary, reports it and keeps running.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type returned by every lifecycle and event hook.
pub type HookResult = Result<(), HookError>;

/// Trait for states driven by a [`StateMachine`](crate::runtime::StateMachine).
///
/// `T` is the type of the controlled entity and `E` the type of input
/// events delivered by the host. A state and its owning machine must agree
/// on both, which the type system enforces when the state is registered.
///
/// # Lifecycle
///
/// 1. `bind` - associates the state with the entity for this activation
/// 2. `on_enter` - called exactly once per activation, before any update
/// 3. `on_update` / `on_physics_update` / input hooks - while active
/// 4. `on_exit` - called exactly once when a transition deactivates it
/// 5. `unbind` - the entity reference is no longer valid
///
/// `on_exit` is not guaranteed to run when the host tears down abruptly.
///
/// # Example
///
/// ```rust
/// use entity_fsm::core::{Context, HookResult, State};
///
/// struct Player {
///     speed: f32,
/// }
///
/// struct Idle;
///
/// impl State<Player> for Idle {
///     fn on_enter(&mut self, ctx: &mut Context<'_, Player>) -> HookResult {
///         ctx.with_entity(|player| player.speed = 0.0);
///         Ok(())
///     }
/// }
/// ```
pub trait State<T: 'static, E = InputEvent> {
    /// Associate this state with the controlled entity.
    ///
    /// Runs on every activation, including reactivation of the same
    /// instance. Failure is reported by the machine as a warning and the
    /// activation continues; the state must then cope with an absent entity.
    fn bind(&mut self, _entity: &EntityHandle) -> Result<(), BindError> {
        Ok(())
    }

    /// Drop whatever `bind` associated. Called right after `on_exit`.
    fn unbind(&mut self) {}

    fn on_enter(&mut self, _ctx: &mut Context<'_, T>) -> HookResult {
        Ok(())
    }

    /// Called once when a transition deactivates this state.
    ///
    /// Transitions requested from here are ignored.
    fn on_exit(&mut self, _ctx: &mut Context<'_, T>) -> HookResult {
        Ok(())
    }

    /// Called once per logic tick while active.
    fn on_update(&mut self, _ctx: &mut Context<'_, T>, _delta: f64) -> HookResult {
        Ok(())
    }

    /// Called once per fixed-step physics tick while active.
    fn on_physics_update(&mut self, _ctx: &mut Context<'_, T>, _delta: f64) -> HookResult {
        Ok(())
    }

    fn on_input_event(&mut self, _ctx: &mut Context<'_, T>, _event: &E) -> HookResult {
        Ok(())
    }

    fn on_unhandled_input_event(&mut self, _ctx: &mut Context<'_, T>, _event: &E) -> HookResult {
        Ok(())
    }

    fn on_unhandled_key_event(&mut self, _ctx: &mut Context<'_, T>, _event: &E) -> HookResult {
        Ok(())
    }
}
