//! Event registry for mapping event identities to listeners.
//!
//! The registry stores, per event, the ordered sequence of registered
//! callbacks. It must be thread-safe and must never hold a lock while a
//! callback runs: the emitter only asks it for a snapshot and invokes the
//! copy.

use crate::event::EventId;
use crate::subscription::{Callback, CallbackKey};
use serde::Serialize;
use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

mod dashmap;
pub use self::dashmap::DashMapRegistry;

/// One registered callback in an event's sequence.
///
/// The callback is stored type-erased; the emitter recovers it with the
/// event's argument and error types.
#[derive(Clone)]
pub struct Registration {
    /// Identity of the callback
    pub key: CallbackKey,

    /// The callback itself, as a `Callback<A, E>`
    callback: Arc<dyn Any + Send + Sync>,
}

impl Registration {
    /// Create a registration for a typed callback
    pub fn new<A: 'static, E: 'static>(callback: Callback<A, E>) -> Self {
        Self {
            key: callback.key(),
            callback: Arc::new(callback),
        }
    }

    /// Recover the typed callback
    pub fn callback<A: 'static, E: 'static>(&self) -> Option<&Callback<A, E>> {
        self.callback.downcast_ref::<Callback<A, E>>()
    }
}

impl Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration").field("key", &self.key).finish()
    }
}

/// Trait for registries that map event identities to listeners.
///
/// Implementations must be thread-safe, keep each sequence in insertion
/// order, and never deduplicate.
pub trait EventRegistry: Send + Sync + Debug {
    /// Append a registration to the event's sequence.
    ///
    /// Returns the sequence length right after the append, read under the
    /// same lock, so concurrent registrations each see a distinct count.
    fn register(&self, event: EventId, registration: Registration) -> usize;

    /// Remove registrations for an event.
    ///
    /// With `Some(key)`, removes every registration with that callback
    /// identity; with `None`, removes all of them. Returns how many were
    /// removed, zero when there was nothing to remove.
    fn remove(&self, event: EventId, key: Option<CallbackKey>) -> usize;

    /// Check whether a callback is registered for an event
    fn contains(&self, event: EventId, key: CallbackKey) -> bool;

    /// Copy of the event's sequence, in registration order
    fn snapshot(&self, event: EventId) -> Vec<Registration>;

    /// Number of registrations for an event
    fn listener_count(&self, event: EventId) -> usize;

    /// Number of registrations across all events
    fn total_listeners(&self) -> usize;

    /// All events that currently have registrations
    fn event_ids(&self) -> Vec<EventId>;

    /// Remove every registration for every event
    fn clear(&self);
}

/// Registry statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    /// Number of events with at least one listener
    pub event_types: usize,

    /// Total number of registrations
    pub total_listeners: usize,

    /// Largest sequence held by a single event
    pub max_listeners_per_event: usize,
}

/// Extension trait for registries with statistics
pub trait RegistryStatistics: EventRegistry {
    /// Get current registry statistics
    fn stats(&self) -> RegistryStats {
        let event_ids = self.event_ids();
        let mut total = 0;
        let mut max = 0;

        for event in &event_ids {
            let count = self.listener_count(*event);
            total += count;
            max = max.max(count);
        }

        RegistryStats {
            event_types: event_ids.len(),
            total_listeners: total,
            max_listeners_per_event: max,
        }
    }
}

impl<T: EventRegistry + ?Sized> RegistryStatistics for T {}
