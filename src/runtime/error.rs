//! Runtime error taxonomy.

use crate::core::BindError;
use std::fmt;
use thiserror::Error;

/// Why a state name could not be resolved.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    #[error("no state registered under that name")]
    NotFound,

    #[error("registered node is a `{found}`, not a state for this machine")]
    TypeMismatch { found: &'static str },
}

/// Why a name could not be registered.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("State name is empty. Register every state under a non-blank name")]
    EmptyStateName,

    #[error("Name '{0}' is already registered")]
    DuplicateName(String),
}

/// The hook in which a state faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Enter,
    Exit,
    Update,
    PhysicsUpdate,
    Input,
    UnhandledInput,
    UnhandledKeyInput,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enter => "on_enter",
            Self::Exit => "on_exit",
            Self::Update => "on_update",
            Self::PhysicsUpdate => "on_physics_update",
            Self::Input => "on_input_event",
            Self::UnhandledInput => "on_unhandled_input_event",
            Self::UnhandledKeyInput => "on_unhandled_key_event",
        };
        f.write_str(name)
    }
}

/// Errors reported by a [`StateMachine`](super::StateMachine).
///
/// None of these ever propagate into the host's tick loop; forwarding entry
/// points report them and carry on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FsmError {
    #[error("state machine has no controlled entity configured")]
    MissingEntity,

    #[error("state machine has no default state configured")]
    MissingDefaultState,

    #[error("default state '{name}' cannot be started: {reason}")]
    UnknownDefaultState {
        name: String,
        #[source]
        reason: ResolveError,
    },

    #[error("controlled entity was released before state '{state}' could bind to it")]
    EntityReleased { state: String },

    #[error("state '{state}' failed to bind: {source}")]
    Bind {
        state: String,
        #[source]
        source: BindError,
    },

    #[error("failed to switch to state: {name} (not found or type mismatch)")]
    Transition {
        name: String,
        #[source]
        reason: ResolveError,
    },

    #[error("state '{state}' faulted in {hook}: {message}")]
    StateFault {
        state: String,
        hook: Hook,
        message: String,
    },

    #[error("state '{state}' requested a switch to '{target}' while exiting; ignored")]
    ReentrantSwitch { state: String, target: String },

    #[error("transition chain exceeded {limit} switches, stopped before '{name}'")]
    TransitionChainTooLong { name: String, limit: usize },
}

impl FsmError {
    /// Configuration problems leave the machine inert.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingEntity | Self::MissingDefaultState | Self::UnknownDefaultState { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_names_target() {
        let err = FsmError::Transition {
            name: "Nonexistent".to_string(),
            reason: ResolveError::NotFound,
        };
        assert_eq!(
            err.to_string(),
            "failed to switch to state: Nonexistent (not found or type mismatch)"
        );
    }

    #[test]
    fn state_fault_names_hook() {
        let err = FsmError::StateFault {
            state: "Idle".to_string(),
            hook: Hook::PhysicsUpdate,
            message: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "state 'Idle' faulted in on_physics_update: boom"
        );
    }

    #[test]
    fn configuration_errors_are_classified() {
        assert!(FsmError::MissingEntity.is_configuration());
        assert!(FsmError::MissingDefaultState.is_configuration());
        assert!(FsmError::UnknownDefaultState {
            name: "Flying".to_string(),
            reason: ResolveError::NotFound,
        }
        .is_configuration());
        assert!(!FsmError::Transition {
            name: "X".to_string(),
            reason: ResolveError::NotFound,
        }
        .is_configuration());
    }

    #[test]
    fn unknown_default_names_state_and_reason() {
        let err = FsmError::UnknownDefaultState {
            name: "Animator".to_string(),
            reason: ResolveError::TypeMismatch { found: "AnimationPlayer" },
        };
        assert_eq!(
            err.to_string(),
            "default state 'Animator' cannot be started: registered node is a `AnimationPlayer`, not a state for this machine"
        );
    }

    #[test]
    fn registry_errors_name_offending_entry() {
        assert_eq!(
            RegistryError::DuplicateName("Idle".to_string()).to_string(),
            "Name 'Idle' is already registered"
        );
    }
}
