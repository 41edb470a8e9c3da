//! Core state abstraction.
//!
//! This module contains everything a concrete state needs:
//! - The `State` capability set with no-op default hooks
//! - The per-call `Context` giving access to the entity and transitions
//! - The `Binding` helper for holding a non-owning entity reference
//! - The default `InputEvent` type

mod binding;
mod context;
mod input;
mod state;

pub use binding::{entity_handle, BindError, Binding, EntityHandle};
pub use context::Context;
pub use input::{InputEvent, KeyCode};
pub use state::{HookError, HookResult, State};
