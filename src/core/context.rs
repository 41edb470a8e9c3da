//! Per-call context handed to state hooks.

use std::cell::RefCell;
use std::rc::Rc;

/// What a state sees of its machine while one of its hooks runs.
///
/// The context exposes the controlled entity and the machine's transition
/// entry point. A transition requested through [`Context::switch_to`] is
/// carried out by the machine as soon as the hook returns, before the host's
/// entry-point call completes.
pub struct Context<'a, T> {
    entity: Option<Rc<RefCell<T>>>,
    state_name: &'a str,
    requested: Option<String>,
}

impl<'a, T> Context<'a, T> {
    pub fn new(entity: Option<Rc<RefCell<T>>>, state_name: &'a str) -> Self {
        Self {
            entity,
            state_name,
            requested: None,
        }
    }

    /// The controlled entity, if the machine still has one.
    pub fn entity(&self) -> Option<&Rc<RefCell<T>>> {
        self.entity.as_ref()
    }

    /// Run `f` with mutable access to the entity.
    ///
    /// Returns `None` when there is no entity or it is already borrowed.
    pub fn with_entity<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let entity = self.entity.as_ref()?;
        let mut guard = entity.try_borrow_mut().ok()?;
        Some(f(&mut *guard))
    }

    /// Name under which the running state is registered.
    pub fn state_name(&self) -> &str {
        self.state_name
    }

    /// Request a transition to the state registered as `name`.
    ///
    /// Only the last request made during a single hook call is honored.
    pub fn switch_to(&mut self, name: impl Into<String>) {
        self.requested = Some(name.into());
    }

    pub fn requested_switch(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn take_requested_switch(&mut self) -> Option<String> {
        self.requested.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Door {
        open: bool,
    }

    #[test]
    fn with_entity_mutates_shared_entity() {
        let door = Rc::new(RefCell::new(Door { open: false }));
        let ctx = Context::new(Some(door.clone()), "Opening");

        let result = ctx.with_entity(|d| {
            d.open = true;
            7
        });

        assert_eq!(result, Some(7));
        assert!(door.borrow().open);
    }

    #[test]
    fn with_entity_returns_none_without_entity() {
        let ctx: Context<'_, Door> = Context::new(None, "Opening");
        assert!(ctx.entity().is_none());
        assert_eq!(ctx.with_entity(|d| d.open), None);
    }

    #[test]
    fn with_entity_returns_none_when_already_borrowed() {
        let door = Rc::new(RefCell::new(Door { open: false }));
        let ctx = Context::new(Some(door.clone()), "Opening");

        let _held = door.borrow_mut();
        assert_eq!(ctx.with_entity(|d| d.open), None);
    }

    #[test]
    fn last_switch_request_wins() {
        let mut ctx: Context<'_, Door> = Context::new(None, "Closed");
        assert!(ctx.requested_switch().is_none());

        ctx.switch_to("Opening");
        ctx.switch_to("Locked");

        assert_eq!(ctx.requested_switch(), Some("Locked"));
        assert_eq!(ctx.take_requested_switch().as_deref(), Some("Locked"));
        assert!(ctx.take_requested_switch().is_none());
    }

    #[test]
    fn state_name_is_exposed() {
        let ctx: Context<'_, Door> = Context::new(None, "Closed");
        assert_eq!(ctx.state_name(), "Closed");
    }
}
