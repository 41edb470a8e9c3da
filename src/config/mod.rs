//! Serializable machine configuration.
//!
//! Everything a host sets before the first tick, apart from the state
//! instances themselves, can be loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a machine does when a transition target cannot be resolved.
///
/// The previous state's `on_exit` has already run by the time resolution
/// fails, and no `on_enter` is invoked under either policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep pointing at the exited state and keep forwarding events to it.
    #[default]
    KeepStale,

    /// Drop the active state; forwarding is a no-op until the next
    /// successful switch.
    Clear,
}

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Machine configuration names an empty default state")]
    EmptyDefaultState,
}

/// Host-provided configuration of a state machine.
///
/// # Example
///
/// ```rust
/// use entity_fsm::config::{FailurePolicy, MachineConfig};
///
/// let config = MachineConfig::from_json(
///     r#"{ "entity_name": "Player", "default_state": "Idle", "failure_policy": "clear" }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.default_state.as_deref(), Some("Idle"));
/// assert_eq!(config.failure_policy, FailurePolicy::Clear);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name used in transition traces. Defaults to the entity's type name.
    pub entity_name: Option<String>,

    /// State activated after initialization.
    pub default_state: Option<String>,

    pub failure_policy: FailurePolicy,
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.default_state {
            Some(name) if name.trim().is_empty() => Err(ConfigError::EmptyDefaultState),
            _ => Ok(()),
        }
    }
}

/// Last path segment of `T`'s type name, e.g. `Player` for `game::Player`.
pub(crate) fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
