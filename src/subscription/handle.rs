//! Listener handles for managing a registration's lifecycle.

use super::callback::{Callback, CallbackKey};
use crate::emitter::EmitterCore;
use crate::event::EventId;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};
use uuid::Uuid;

/// A handle to one registration made by a subscribe call.
///
/// The handle identifies the registration; it does not own it. Dropping a
/// `Listener` leaves the listener subscribed, and the handle never keeps the
/// emitter alive. Call [`unbind`](Self::unbind) to remove the registration.
///
/// Every subscribe call returns a new handle, distinct from all others even
/// when the same callback is subscribed to the same event twice. A `clone()`
/// is the same handle.
#[derive(Clone)]
pub struct Listener {
    /// Unique ID for this handle
    id: Uuid,

    /// Event this registration belongs to
    event_id: EventId,

    /// Event name, for debugging
    event_name: Option<Arc<str>>,

    /// Identity of the registered callback
    key: CallbackKey,

    /// Reserves the callback's allocation so its key stays unique while the
    /// handle lives, without keeping the closure's captures alive
    _callback: Weak<dyn Any + Send + Sync>,

    /// Emitter that issued the handle
    owner: Weak<EmitterCore>,
}

impl Listener {
    pub(crate) fn new<A: 'static, E: 'static>(
        owner: Weak<EmitterCore>,
        event_id: EventId,
        event_name: Option<Arc<str>>,
        callback: &Callback<A, E>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            event_name,
            key: callback.key(),
            _callback: callback.downgrade(),
            owner,
        }
    }

    /// Get the handle ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the event this handle was issued for
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Get the event name if one was set
    pub fn event_name(&self) -> Option<&str> {
        self.event_name.as_deref()
    }

    /// Get the identity of the registered callback
    pub fn callback_key(&self) -> CallbackKey {
        self.key
    }

    /// Remove this registration from its emitter.
    ///
    /// Removes every registration of this callback under this event, so a
    /// second handle for the same (event, callback) pair goes inactive too.
    /// Calling it again, or after the emitter was dropped, does nothing.
    pub fn unbind(&self) {
        if let Some(owner) = self.owner.upgrade() {
            owner.remove(self.event_id, Some(self.key));
        }
    }

    /// Check if the registration is still present in the emitter
    pub fn is_active(&self) -> bool {
        self.owner
            .upgrade()
            .map(|owner| owner.contains(self.event_id, self.key))
            .unwrap_or(false)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("event_id", &self.event_id)
            .field("event_name", &self.event_name)
            .field("key", &self.key)
            .finish()
    }
}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event_name {
            Some(name) => write!(f, "Listener on '{}' ({})", name, self.id),
            None => write!(f, "Listener on {} ({})", self.event_id, self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventEmitter;

    #[test]
    fn test_listener_lifecycle() {
        let emitter = EventEmitter::new();
        let event = emitter.register_event::<String>();

        let listener = event.subscribe(|_: &String| {});
        assert!(listener.is_active());
        assert_eq!(listener.event_id(), event.id());

        listener.unbind();
        assert!(!listener.is_active());
        assert_eq!(emitter.listener_count(&event), 0);
    }

    #[test]
    fn test_unbind_twice_is_noop() {
        let emitter = EventEmitter::new();
        let event = emitter.register_event::<String>();
        let listener = event.subscribe(|_: &String| {});
        let other = event.subscribe(|_: &String| {});

        listener.unbind();
        listener.unbind();

        assert!(other.is_active());
        assert_eq!(emitter.listener_count(&event), 1);
    }

    #[test]
    fn test_listener_display() {
        let emitter = EventEmitter::new();
        let event = emitter.register_event::<()>().with_name("resized");
        let listener = event.subscribe(|_: &()| {});

        assert_eq!(listener.event_name(), Some("resized"));
        assert_eq!(
            listener.to_string(),
            format!("Listener on 'resized' ({})", listener.id())
        );
    }

    #[test]
    fn test_handles_are_distinct() {
        let emitter = EventEmitter::new();
        let event = emitter.register_event::<()>();
        let callback = Callback::new(|_: &()| {});

        let first = event.subscribe_callback(&callback);
        let second = event.subscribe_callback(&callback);

        assert_ne!(first, second);
        assert_eq!(first, first.clone());
        assert_eq!(first.callback_key(), second.callback_key());
    }

    #[test]
    fn test_unbind_after_emitter_dropped() {
        let emitter = EventEmitter::new();
        let event = emitter.register_event::<()>();
        let listener = event.subscribe(|_: &()| {});

        drop(emitter);
        assert!(!listener.is_active());
        listener.unbind();
    }
}
