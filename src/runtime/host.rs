//! Boundary between the host's per-frame scheduler and a machine.
//!
//! The runtime never drives its own loop. A host delivers events in
//! whatever order it defines; by convention that is logic tick, physics
//! ticks, then input.

use crate::core::InputEvent;

/// One event category delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent<E = InputEvent> {
    /// Per-frame logic tick with the elapsed seconds.
    LogicTick(f64),
    /// Fixed-step physics tick with the step length in seconds.
    PhysicsTick(f64),
    Input(E),
    UnhandledInput(E),
    UnhandledKeyInput(E),
}

impl<E> HostEvent<E> {
    pub fn is_tick(&self) -> bool {
        matches!(self, Self::LogicTick(_) | Self::PhysicsTick(_))
    }
}

/// Anything a host scheduler can deliver events to.
pub trait EventSink<E = InputEvent> {
    fn deliver(&mut self, event: HostEvent<E>);

    /// Deliver a batch in order.
    fn deliver_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = HostEvent<E>>,
        Self: Sized,
    {
        for event in events {
            self.deliver(event);
        }
    }
}
