//! Builder pattern for constructing EventEmitter instances.

use crate::emitter::config::EmitterConfig;
use crate::registry::{DashMapRegistry, EventRegistry};
use crate::{EventEmitter, Result};
use std::sync::Arc;
use tracing::info;

/// Builder for creating EventEmitter instances
#[derive(Debug, Default)]
pub struct EventEmitterBuilder {
    config: EmitterConfig,
    registry: Option<Arc<dyn EventRegistry>>,
}

impl EventEmitterBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom configuration
    pub fn config(mut self, config: EmitterConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure the emitter
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(EmitterConfig) -> EmitterConfig,
    {
        self.config = f(self.config);
        self
    }

    /// Use a custom registry implementation
    pub fn registry(mut self, registry: Arc<dyn EventRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build with a leak warning threshold
    pub fn leak_checked(self, max: usize) -> Self {
        self.configure(|c| c.max_listeners(max))
    }

    /// Build the EventEmitter
    pub fn build(self) -> Result<EventEmitter> {
        self.config.validate()?;

        let registry = self.registry.unwrap_or_else(|| {
            Arc::new(DashMapRegistry::with_capacity(self.config.registry_capacity))
        });

        info!(
            max_listeners = ?self.config.max_listeners,
            trace_emissions = self.config.trace_emissions,
            "EventEmitter built"
        );

        Ok(EventEmitter::from_parts(self.config, registry))
    }
}
