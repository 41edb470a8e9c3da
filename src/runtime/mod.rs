//! The state machine runtime.
//!
//! This module is the transition controller around the core state
//! abstraction:
//! - `StateRegistry` resolves state names to pre-created instances
//! - `StateMachine` owns the active state, switches it and forwards events
//! - `HostEvent` / `EventSink` form the boundary to the host scheduler

mod error;
mod host;
mod machine;
mod registry;

pub use error::{FsmError, Hook, RegistryError, ResolveError};
pub use host::{EventSink, HostEvent};
pub use machine::{MachineStatus, StateMachine, MAX_CHAINED_TRANSITIONS};
pub use registry::StateRegistry;
