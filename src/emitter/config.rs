//! Configuration for the event emitter.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for an [`EventEmitter`](crate::EventEmitter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Listener count per event above which a leak warning is logged
    pub max_listeners: Option<usize>,

    /// Initial number of event slots to allocate in the default registry
    pub registry_capacity: usize,

    /// Log each emission at debug level
    pub trace_emissions: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: None,
            registry_capacity: 16,
            trace_emissions: true,
        }
    }
}

impl EmitterConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leak warning threshold, `None` disables it
    pub fn max_listeners(mut self, max: impl Into<Option<usize>>) -> Self {
        self.max_listeners = max.into();
        self
    }

    /// Set the initial registry capacity
    pub fn registry_capacity(mut self, capacity: usize) -> Self {
        self.registry_capacity = capacity;
        self
    }

    /// Enable or disable per-emission logging
    pub fn trace_emissions(mut self, enable: bool) -> Self {
        self.trace_emissions = enable;
        self
    }

    /// Check the configuration for values the emitter cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.max_listeners == Some(0) {
            return Err(Error::config(
                "max_listeners must be greater than zero, use None to disable the check",
            ));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Preset configurations for common use cases
impl EmitterConfig {
    /// Warn once an event gathers more than `max` listeners
    pub fn leak_checked(max: usize) -> Self {
        Self::default().max_listeners(max)
    }

    /// Configuration for testing
    pub fn test() -> Self {
        Self::default()
            .registry_capacity(4)
            .trace_emissions(false)
    }
}
