//! Name to state lookup table owned by a machine.

use super::error::{RegistryError, ResolveError};
use crate::core::{InputEvent, State};
use std::any::{type_name, Any};
use std::collections::HashMap;

enum Node<T: 'static, E: 'static> {
    State(Box<dyn State<T, E>>),
    /// A host node that lives alongside the states but is not one of them.
    Foreign {
        type_name: &'static str,
        _node: Box<dyn Any>,
    },
}

struct Entry<T: 'static, E: 'static> {
    name: String,
    node: Node<T, E>,
}

/// Explicit name-to-state table built at configuration time.
///
/// States are pre-created and live in the registry for the machine's whole
/// lifetime; activation only changes which one the machine points at. Other
/// named nodes may be registered too, so that resolving a name that exists
/// but is not a state reports a type mismatch rather than "not found".
pub struct StateRegistry<T: 'static, E: 'static = InputEvent> {
    entries: Vec<Entry<T, E>>,
    index: HashMap<String, usize>,
}

impl<T: 'static, E: 'static> StateRegistry<T, E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register `state` under `name`, returning its slot index.
    pub fn insert_state<S>(
        &mut self,
        name: impl Into<String>,
        state: S,
    ) -> Result<usize, RegistryError>
    where
        S: State<T, E> + 'static,
    {
        self.insert(name.into(), Node::State(Box::new(state)))
    }

    /// Register a non-state node under `name`.
    pub fn insert_node<N: Any>(
        &mut self,
        name: impl Into<String>,
        node: N,
    ) -> Result<usize, RegistryError> {
        self.insert(
            name.into(),
            Node::Foreign {
                type_name: type_name::<N>(),
                _node: Box::new(node),
            },
        )
    }

    fn insert(&mut self, name: String, node: Node<T, E>) -> Result<usize, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyStateName);
        }
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let slot = self.entries.len();
        self.index.insert(name.clone(), slot);
        self.entries.push(Entry { name, node });
        Ok(slot)
    }

    /// Resolve `name` to the slot of a state.
    pub fn resolve(&self, name: &str) -> Result<usize, ResolveError> {
        let slot = *self.index.get(name).ok_or(ResolveError::NotFound)?;
        match &self.entries[slot].node {
            Node::State(_) => Ok(slot),
            Node::Foreign { type_name, .. } => Err(ResolveError::TypeMismatch {
                found: *type_name,
            }),
        }
    }

    pub fn name(&self, slot: usize) -> Option<&str> {
        self.entries.get(slot).map(|entry| entry.name.as_str())
    }

    pub fn state(&self, slot: usize) -> Option<&(dyn State<T, E> + 'static)> {
        match &self.entries.get(slot)?.node {
            Node::State(state) => Some(state.as_ref()),
            Node::Foreign { .. } => None,
        }
    }

    /// Name and state at `slot`, borrowed together.
    pub(crate) fn state_mut(
        &mut self,
        slot: usize,
    ) -> Option<(&str, &mut (dyn State<T, E> + 'static))> {
        let Entry { name, node } = self.entries.get_mut(slot)?;
        match node {
            Node::State(state) => Some((name.as_str(), state.as_mut())),
            Node::Foreign { .. } => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names of registered states, in registration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.node, Node::State(_)))
            .map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: 'static, E: 'static> Default for StateRegistry<T, E> {
    fn default() -> Self {
        Self::new()
    }
}
