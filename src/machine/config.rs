//! Machine configuration.

use crate::core::{StateId, DEFAULT_HISTORY_CAPACITY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of diagnostics kept by a machine.
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = 32;

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Host-provided settings for a [`StateMachine`](crate::StateMachine).
///
/// Every field has a default, so a partial document is valid.
///
/// # Example
///
/// ```rust
/// use panelstack::{MachineConfig, StateId};
///
/// let config = MachineConfig::from_json(r#"{ "name": "HUD", "initial_state": 2 }"#).unwrap();
/// assert_eq!(config.name, "HUD");
/// assert_eq!(config.initial_state, Some(StateId::new(2)));
/// assert_eq!(config.history_capacity, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Label used in log fields and diagnostics
    pub name: String,

    /// State pushed by `start()`, if any
    pub initial_state: Option<StateId>,

    /// Maximum navigation records kept
    pub history_capacity: usize,

    /// Maximum diagnostics kept
    pub diagnostics_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: "StateMachine".to_string(),
            initial_state: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            diagnostics_capacity: DEFAULT_DIAGNOSTICS_CAPACITY,
        }
    }
}

impl MachineConfig {
    /// Parse a configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
