//! The main EventEmitter implementation.
//!
//! The emitter owns the registry, hands out typed [`Event`] identities and
//! runs emissions. Emission is synchronous: every listener runs on the
//! caller's thread before `emit` returns.
//!
//! Each emission works on a snapshot of the event's listeners taken when it
//! starts. Listeners added or removed while it runs, including a listener
//! unbinding itself, only affect later emissions.

use crate::event::{Event, EventId};
use crate::registry::{
    DashMapRegistry, EventRegistry, Registration, RegistryStatistics, RegistryStats,
};
use crate::subscription::{Callback, CallbackKey, Listener};
use dashmap::DashSet;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub mod builder;
pub mod config;

pub use builder::EventEmitterBuilder;
pub use config::EmitterConfig;

/// State shared by an emitter and, weakly, by its events and listeners.
#[derive(Debug)]
pub(crate) struct EmitterCore {
    config: EmitterConfig,
    registry: Arc<dyn EventRegistry>,
    events_declared: AtomicU64,
    emissions: AtomicU64,
    leak_warned: DashSet<EventId>,
    leak_warnings: AtomicU64,
}

impl EmitterCore {
    pub(crate) fn subscribe<A: 'static, E: 'static>(
        self: &Arc<Self>,
        event: &Event<A, E>,
        callback: Callback<A, E>,
    ) -> Listener {
        let event_id = event.id();
        let listener = Listener::new(Arc::downgrade(self), event_id, event.name_arc(), &callback);
        let count = self.registry.register(event_id, Registration::new(callback));

        debug!(
            event_id = %event_id,
            listener_id = %listener.id(),
            listener_count = count,
            "Listener subscribed"
        );

        if let Some(max) = self.config.max_listeners {
            // Once per event, even if the count later drops and climbs again.
            if count > max && self.leak_warned.insert(event_id) {
                self.leak_warnings.fetch_add(1, Ordering::Relaxed);
                warn!(
                    event_id = %event_id,
                    event_name = ?event.name(),
                    listener_count = count,
                    max_listeners = max,
                    "Possible listener leak: listener count exceeds max_listeners"
                );
            }
        }

        listener
    }

    pub(crate) fn remove(&self, event: EventId, key: Option<CallbackKey>) -> usize {
        let removed = self.registry.remove(event, key);
        if removed > 0 {
            debug!(event_id = %event, removed, "Listeners unsubscribed");
        }
        removed
    }

    pub(crate) fn contains(&self, event: EventId, key: CallbackKey) -> bool {
        self.registry.contains(event, key)
    }
}

/// A typed, synchronous event emitter.
///
/// Declare events with [`register_event`](Self::register_event), let others
/// subscribe through the returned [`Event`], and keep `emit` to yourself by
/// keeping the emitter private.
///
/// # Example
///
/// ```rust
/// use typed_emitter::{Event, EventEmitter};
///
/// struct Socket {
///     emitter: EventEmitter,
///     pub on_message: Event<String>,
/// }
///
/// impl Socket {
///     fn new() -> Self {
///         let emitter = EventEmitter::new();
///         let on_message = emitter.register_event();
///         Self { emitter, on_message }
///     }
///
///     fn receive(&self, text: &str) {
///         self.emitter.notify(&self.on_message, &text.to_string());
///     }
/// }
///
/// let socket = Socket::new();
/// let listener = socket.on_message.subscribe(|text: &String| println!("got {text}"));
/// socket.receive("hello");
/// listener.unbind();
/// ```
#[derive(Debug)]
pub struct EventEmitter {
    core: Arc<EmitterCore>,
}

impl EventEmitter {
    /// Create an emitter with the default configuration
    pub fn new() -> Self {
        let config = EmitterConfig::default();
        let registry = Arc::new(DashMapRegistry::with_capacity(config.registry_capacity));
        Self::from_parts(config, registry)
    }

    /// Create a new EventEmitter builder
    pub fn builder() -> EventEmitterBuilder {
        EventEmitterBuilder::new()
    }

    pub(crate) fn from_parts(config: EmitterConfig, registry: Arc<dyn EventRegistry>) -> Self {
        Self {
            core: Arc::new(EmitterCore {
                config,
                registry,
                events_declared: AtomicU64::new(0),
                emissions: AtomicU64::new(0),
                leak_warned: DashSet::new(),
                leak_warnings: AtomicU64::new(0),
            }),
        }
    }

    /// Get the emitter's configuration
    pub fn config(&self) -> &EmitterConfig {
        &self.core.config
    }

    /// Declare a new event whose listeners cannot fail
    pub fn register_event<A: 'static>(&self) -> Event<A> {
        self.register_fallible_event()
    }

    /// Declare a new event whose listeners may fail with `E`.
    ///
    /// The first listener returning `Err` stops the emission and its error
    /// is returned from [`emit`](Self::emit).
    pub fn register_fallible_event<A: 'static, E: 'static>(&self) -> Event<A, E> {
        let event = Event::new(Arc::downgrade(&self.core));
        self.core.events_declared.fetch_add(1, Ordering::Relaxed);
        trace!(event_id = %event.id(), "Event registered");
        event
    }

    /// Declare a new event carrying a debug name.
    ///
    /// The name shows up in logs and in listener handles' `Display`. It is
    /// not an identity: two events with the same name stay distinct.
    pub fn register_named_event<A: 'static, E: 'static>(
        &self,
        name: impl Into<Arc<str>>,
    ) -> Event<A, E> {
        let event = self.register_fallible_event().with_name(name);
        debug!(event_id = %event.id(), event_name = ?event.name(), "Named event registered");
        event
    }

    /// Subscribe a callback to an event.
    ///
    /// Appends to the event's listeners and never fails. The same callback
    /// may be subscribed any number of times; each call returns its own
    /// handle.
    pub fn subscribe<A: 'static, E: 'static>(
        &self,
        event: &Event<A, E>,
        callback: &Callback<A, E>,
    ) -> Listener {
        if !event.belongs_to(&self.core) {
            debug!(event_id = %event.id(), "Subscribing to an event declared by another emitter");
        }
        self.core.subscribe(event, callback.clone())
    }

    /// Remove every listener of every event
    pub fn clear_all(&self) {
        let removed = self.core.registry.total_listeners();
        self.core.registry.clear();
        debug!(removed, "All listeners cleared");
    }

    /// Remove the registration a handle was issued for.
    ///
    /// Same as [`remove_by_identity`](Self::remove_by_identity) with the
    /// handle's event and callback. Returns how many registrations were
    /// removed; zero if the handle was already unbound.
    pub fn remove_by_handle(&self, listener: &Listener) -> usize {
        self.core
            .remove(listener.event_id(), Some(listener.callback_key()))
    }

    /// Remove listeners of one event.
    ///
    /// With a callback, removes every registration of that callback (it may
    /// have been subscribed more than once); without one, removes all of the
    /// event's listeners. Other events are untouched. Removing something
    /// that is not registered does nothing.
    pub fn remove_by_identity<A: 'static, E: 'static>(
        &self,
        event: &Event<A, E>,
        callback: Option<&Callback<A, E>>,
    ) -> usize {
        self.core.remove(event.id(), callback.map(Callback::key))
    }

    /// Invoke every listener of `event` with `args`, in subscription order.
    ///
    /// The set of listeners is fixed when the call starts. If a listener
    /// returns `Err`, the remaining listeners are skipped and that error is
    /// returned as is. Panics in a listener propagate the same way.
    pub fn emit<A: 'static, E: 'static>(&self, event: &Event<A, E>, args: &A) -> Result<(), E> {
        let snapshot = self.core.registry.snapshot(event.id());
        self.core.emissions.fetch_add(1, Ordering::Relaxed);

        if self.core.config.trace_emissions {
            debug!(
                event_id = %event.id(),
                event_name = ?event.name(),
                listener_count = snapshot.len(),
                "Emitting event"
            );
        }

        for (index, registration) in snapshot.iter().enumerate() {
            let Some(callback) = registration.callback::<A, E>() else {
                warn!(
                    event_id = %event.id(),
                    key = ?registration.key,
                    "Registered callback does not match the event signature, skipping"
                );
                continue;
            };

            if let Err(err) = callback.call(args) {
                debug!(
                    event_id = %event.id(),
                    listener_index = index,
                    skipped = snapshot.len() - index - 1,
                    "Listener failed, emission aborted"
                );
                return Err(err);
            }
        }

        Ok(())
    }

    /// Emit an event whose listeners cannot fail
    pub fn notify<A: 'static>(&self, event: &Event<A>, args: &A) {
        match self.emit(event, args) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Number of listeners currently registered for an event
    pub fn listener_count<A: 'static, E: 'static>(&self, event: &Event<A, E>) -> usize {
        self.core.registry.listener_count(event.id())
    }

    /// Check if an event has any listener
    pub fn has_listeners<A: 'static, E: 'static>(&self, event: &Event<A, E>) -> bool {
        self.listener_count(event) > 0
    }

    /// Get statistics about the emitter
    pub fn stats(&self) -> EmitterStats {
        EmitterStats {
            registry: self.core.registry.stats(),
            events_declared: self.core.events_declared.load(Ordering::Relaxed),
            emissions: self.core.emissions.load(Ordering::Relaxed),
            leak_warnings: self.core.leak_warnings.load(Ordering::Relaxed),
        }
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about an emitter
#[derive(Debug, Clone, Serialize)]
pub struct EmitterStats {
    /// Registry statistics
    pub registry: RegistryStats,

    /// Number of events declared on the emitter
    pub events_declared: u64,

    /// Number of emissions performed
    pub emissions: u64,

    /// Number of events that went past `max_listeners`
    pub leak_warnings: u64,
}

impl fmt::Display for EmitterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EventEmitter Stats: {} listeners on {} events ({} declared), {} emissions",
            self.registry.total_listeners,
            self.registry.event_types,
            self.events_declared,
            self.emissions
        )
    }
}
