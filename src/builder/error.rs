//! Build errors for state registries and machines.

use crate::runtime::RegistryError;
use thiserror::Error;

/// Errors that can occur when registering states and building machines.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Default state '{0}' is not registered. Call .state(\"{0}\", ..) before .build()")]
    UnknownDefaultState(String),

    #[error("Default state '{0}' is registered but is not a state")]
    DefaultIsNotAState(String),
}
