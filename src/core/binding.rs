//! Non-owning entity references held by states between activations.

use std::any::{type_name, Any};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// Type-erased handle to a controlled entity.
///
/// Entities are shared as `Rc<RefCell<T>>`; the handle erases `T` the way a
/// host scene node would, so binding can check it against the state's type.
pub type EntityHandle = Rc<dyn Any>;

/// Errors that can occur while binding a state to an entity.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BindError {
    #[error("entity cannot be viewed as `{expected}`")]
    EntityTypeMismatch { expected: &'static str },
}

/// Wrap an entity in a type-erased handle.
pub fn entity_handle<T: 'static>(entity: &Rc<RefCell<T>>) -> EntityHandle {
    entity.clone()
}

/// A state's view of its controlled entity.
///
/// Holds a `Weak` reference so the runtime never extends the entity's
/// lifetime. The reference is only meaningful between `bind` and `unbind`.
pub struct Binding<T> {
    entity: Option<Weak<RefCell<T>>>,
}

impl<T: 'static> Binding<T> {
    pub fn new() -> Self {
        Self { entity: None }
    }

    /// Bind to `handle`, which must hold a `RefCell<T>`.
    ///
    /// On mismatch any previous binding is cleared and the error returned.
    pub fn bind(&mut self, handle: &EntityHandle) -> Result<(), BindError> {
        match Rc::clone(handle).downcast::<RefCell<T>>() {
            Ok(entity) => {
                self.entity = Some(Rc::downgrade(&entity));
                Ok(())
            }
            Err(_) => {
                self.entity = None;
                Err(BindError::EntityTypeMismatch {
                    expected: type_name::<T>(),
                })
            }
        }
    }

    pub fn unbind(&mut self) {
        self.entity = None;
    }

    /// The bound entity, if bound and still alive.
    pub fn get(&self) -> Option<Rc<RefCell<T>>> {
        self.entity.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_bound(&self) -> bool {
        self.get().is_some()
    }
}

impl<T: 'static> Default for Binding<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("entity", &type_name::<T>())
            .field("bound", &self.is_bound())
            .finish()
    }
}
