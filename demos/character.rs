//! Character Controller
//!
//! This example drives a platformer character through a scripted sequence
//! of frames.
//!
//! Key concepts:
//! - States only implement the hooks they need
//! - Transitions are requested by name from inside hooks
//! - The host owns the loop and forwards ticks and input each frame
//! - Diagnostics go through `tracing`
//!
//! Run with: RUST_LOG=info cargo run --example character

use entity_fsm::builder::StateMachineBuilder;
use entity_fsm::core::{Context, HookError, HookResult, InputEvent, KeyCode, State};
use entity_fsm::runtime::{HostEvent, StateMachine};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

const PHYSICS_DT: f64 = 1.0 / 60.0;
const WALK_SPEED: f64 = 3.0;
const JUMP_VELOCITY: f64 = 5.0;
const GRAVITY: f64 = -9.8;
const KEY_SPACE: KeyCode = KeyCode(44);

#[derive(Debug, Default)]
struct Character {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

struct Idle;

impl State<Character> for Idle {
    fn on_enter(&mut self, ctx: &mut Context<'_, Character>) -> HookResult {
        ctx.with_entity(|c| c.vx = 0.0);
        Ok(())
    }

    fn on_input_event(&mut self, ctx: &mut Context<'_, Character>, event: &InputEvent) -> HookResult {
        if event.is_action("move_right") {
            ctx.switch_to("Moving");
        } else if event.is_action("crouch") {
            // Not registered: the machine reports the failed switch.
            ctx.switch_to("Crouching");
        }
        Ok(())
    }

    fn on_unhandled_key_event(
        &mut self,
        ctx: &mut Context<'_, Character>,
        event: &InputEvent,
    ) -> HookResult {
        if *event == InputEvent::KeyPressed(KEY_SPACE) {
            ctx.switch_to("Jumping");
        }
        Ok(())
    }
}

struct Moving;

impl State<Character> for Moving {
    fn on_enter(&mut self, ctx: &mut Context<'_, Character>) -> HookResult {
        ctx.with_entity(|c| c.vx = WALK_SPEED);
        Ok(())
    }

    fn on_input_event(&mut self, ctx: &mut Context<'_, Character>, event: &InputEvent) -> HookResult {
        if event.is_action("stop") {
            ctx.switch_to("Idle");
        }
        Ok(())
    }

    fn on_unhandled_key_event(
        &mut self,
        ctx: &mut Context<'_, Character>,
        event: &InputEvent,
    ) -> HookResult {
        if *event == InputEvent::KeyPressed(KEY_SPACE) {
            ctx.switch_to("Jumping");
        }
        Ok(())
    }

    fn on_physics_update(&mut self, ctx: &mut Context<'_, Character>, delta: f64) -> HookResult {
        ctx.with_entity(|c| c.x += c.vx * delta)
            .ok_or_else(|| HookError::new("character unavailable"))
    }
}

#[derive(Default)]
struct Jumping {
    airtime: f64,
}

impl State<Character> for Jumping {
    fn on_enter(&mut self, ctx: &mut Context<'_, Character>) -> HookResult {
        self.airtime = 0.0;
        ctx.with_entity(|c| c.vy = JUMP_VELOCITY);
        Ok(())
    }

    fn on_exit(&mut self, ctx: &mut Context<'_, Character>) -> HookResult {
        tracing::info!(airtime = self.airtime, "landed");
        ctx.with_entity(|c| {
            c.y = 0.0;
            c.vy = 0.0;
        });
        Ok(())
    }

    fn on_physics_update(&mut self, ctx: &mut Context<'_, Character>, delta: f64) -> HookResult {
        self.airtime += delta;
        let landed = ctx
            .with_entity(|c| {
                c.vy += GRAVITY * delta;
                c.x += c.vx * delta;
                c.y += c.vy * delta;
                c.y <= 0.0
            })
            .ok_or_else(|| HookError::new("character unavailable"))?;
        if landed {
            ctx.switch_to("Idle");
        }
        Ok(())
    }
}

fn scripted_input(frame: usize) -> Vec<HostEvent> {
    match frame {
        10 => vec![HostEvent::Input(InputEvent::Action("move_right".into()))],
        40 => vec![HostEvent::UnhandledKeyInput(InputEvent::KeyPressed(KEY_SPACE))],
        130 => vec![HostEvent::Input(InputEvent::Action("crouch".into()))],
        _ => Vec::new(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Character Controller Example ===\n");

    let character = Rc::new(RefCell::new(Character::default()));
    let mut machine: StateMachine<Character> = match StateMachineBuilder::new()
        .entity_name("Hero")
        .default_state("Idle")
        .state("Idle", Idle)
        .state("Moving", Moving)
        .state("Jumping", Jumping::default())
        .build()
    {
        Ok(machine) => machine,
        Err(err) => {
            eprintln!("Failed to build state machine: {err}");
            return;
        }
    };

    machine.initialize(Some(&character), None);

    for frame in 0..160 {
        let mut events = vec![HostEvent::LogicTick(PHYSICS_DT), HostEvent::PhysicsTick(PHYSICS_DT)];
        events.extend(scripted_input(frame));
        machine.run_frame(events);

        if frame % 20 == 0 {
            let c = character.borrow();
            println!(
                "frame {:>3}: state={:<8} x={:>6.2} y={:>5.2}",
                frame,
                machine.current_state_name().unwrap_or("-"),
                c.x,
                c.y
            );
        }
    }

    println!("\nFinal state: {:?}", machine.current_state_name());
    println!("Status: {:?}", machine.status());
    println!("\n=== Example Complete ===");
}
