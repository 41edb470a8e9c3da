//! Entity FSM: a strongly-typed state machine runtime for a single
//! controlled entity.
//!
//! A host (typically a game loop) owns an entity and a [`StateMachine`].
//! Each frame it forwards logic ticks, physics ticks and input events to the
//! machine, which hands them to the one active [`State`]. States switch by
//! name; the machine exits the old state, binds and enters the new one
//! synchronously, and reports everything through a [`Reporter`].
//!
//! # Core Concepts
//!
//! - **State**: Behavior unit with no-op default hooks via the `State` trait
//! - **Machine**: Owns the active state and forwards host events to it
//! - **Registry**: Explicit name-to-state table built at configuration time
//! - **Reporter**: Diagnostic channel; faults never reach the host
//!
//! # Example
//!
//! ```rust
//! use entity_fsm::builder::StateMachineBuilder;
//! use entity_fsm::core::{Context, HookResult, InputEvent, State};
//! use entity_fsm::runtime::StateMachine;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! #[derive(Default)]
//! struct Character {
//!     height: f64,
//! }
//!
//! struct Grounded;
//!
//! impl State<Character> for Grounded {
//!     fn on_input_event(&mut self, ctx: &mut Context<'_, Character>, event: &InputEvent) -> HookResult {
//!         if event.is_action("jump") {
//!             ctx.switch_to("Airborne");
//!         }
//!         Ok(())
//!     }
//! }
//!
//! struct Airborne;
//!
//! impl State<Character> for Airborne {
//!     fn on_physics_update(&mut self, ctx: &mut Context<'_, Character>, delta: f64) -> HookResult {
//!         ctx.with_entity(|c| c.height += 2.0 * delta);
//!         Ok(())
//!     }
//! }
//!
//! let character = Rc::new(RefCell::new(Character::default()));
//! let mut machine: StateMachine<Character> = StateMachineBuilder::new()
//!     .default_state("Grounded")
//!     .state("Grounded", Grounded)
//!     .state("Airborne", Airborne)
//!     .build()
//!     .unwrap();
//!
//! machine.initialize(Some(&character), None);
//! machine.on_input(&InputEvent::Action("jump".to_string()));
//! machine.on_physics_tick(0.5);
//!
//! assert_eq!(machine.current_state_name(), Some("Airborne"));
//! assert_eq!(character.borrow().height, 1.0);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod report;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use config::{FailurePolicy, MachineConfig};
pub use crate::core::{Context, HookError, HookResult, InputEvent, State};
pub use report::{Report, Reporter};
pub use runtime::{FsmError, HostEvent, MachineStatus, StateMachine};
