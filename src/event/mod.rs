//! Typed event identities.
//!
//! An [`Event`] is produced by [`EventEmitter::register_event`] and is both
//! the key listeners are stored under and the public place to subscribe.
//! The argument type `A` and listener error type `E` are fixed at
//! declaration, so a listener with the wrong shape does not compile.
//!
//! [`EventEmitter::register_event`]: crate::EventEmitter::register_event

use crate::emitter::EmitterCore;
use crate::subscription::{Callback, CallbackResult, Listener};
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};
use tracing::debug;
use uuid::Uuid;

/// Unique identity of a declared event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(Uuid);

impl EventId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying token
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A declared event carrying arguments of type `A`.
///
/// Listeners receive `&A`; use a tuple for several arguments. Listeners
/// return `()` or `Result<(), E>`, and the first `Err` stops the emission.
///
/// Holds only a weak reference to its emitter, so it can be cloned and
/// handed out freely. Emission stays with whoever owns the emitter.
///
/// # Example
///
/// ```rust
/// use typed_emitter::{Event, EventEmitter};
///
/// struct Download {
///     emitter: EventEmitter,
///     on_progress: Event<(u64, u64)>,
/// }
///
/// impl Download {
///     fn new() -> Self {
///         let emitter = EventEmitter::new();
///         let on_progress = emitter.register_event().with_name("progress");
///         Self { emitter, on_progress }
///     }
///
///     fn on_progress(&self) -> &Event<(u64, u64)> {
///         &self.on_progress
///     }
///
///     fn advance(&self, done: u64, total: u64) {
///         self.emitter.notify(&self.on_progress, &(done, total));
///     }
/// }
///
/// let download = Download::new();
/// download.on_progress().subscribe(|(done, total): &(u64, u64)| {
///     println!("{done}/{total}");
/// });
/// download.advance(512, 1024);
/// ```
pub struct Event<A, E = Infallible> {
    id: EventId,
    name: Option<Arc<str>>,
    core: Weak<EmitterCore>,
    _signature: PhantomData<fn(&A) -> E>,
}

impl<A: 'static, E: 'static> Event<A, E> {
    pub(crate) fn new(core: Weak<EmitterCore>) -> Self {
        Self {
            id: EventId::new(),
            name: None,
            core,
            _signature: PhantomData,
        }
    }

    /// Attach a name used in logs and handle display
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The event's identity
    pub fn id(&self) -> EventId {
        self.id
    }

    /// The event's name, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn name_arc(&self) -> Option<Arc<str>> {
        self.name.clone()
    }

    /// Subscribe a closure to this event.
    ///
    /// Each call registers a fresh callback. To register the same callback
    /// more than once, or to remove it later by identity, build a
    /// [`Callback`] and use [`subscribe_callback`](Self::subscribe_callback).
    pub fn subscribe<F, R>(&self, f: F) -> Listener
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: CallbackResult<E>,
    {
        self.subscribe_callback(&Callback::new(f))
    }

    /// Subscribe an existing callback to this event
    pub fn subscribe_callback(&self, callback: &Callback<A, E>) -> Listener {
        match self.core.upgrade() {
            Some(core) => core.subscribe(self, callback.clone()),
            None => {
                debug!(event_id = %self.id, "Emitter dropped, returning inert listener");
                Listener::new(Weak::new(), self.id, self.name.clone(), callback)
            }
        }
    }

    pub(crate) fn belongs_to(&self, core: &Arc<EmitterCore>) -> bool {
        Weak::ptr_eq(&self.core, &Arc::downgrade(core))
    }
}

impl<A, E> Clone for Event<A, E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            core: self.core.clone(),
            _signature: PhantomData,
        }
    }
}

impl<A, E> PartialEq for Event<A, E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A, E> Eq for Event<A, E> {}

impl<A, E> fmt::Debug for Event<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("args", &std::any::type_name::<A>())
            .finish()
    }
}

impl<A, E> fmt::Display for Event<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Event '{}' ({})", name, self.id),
            None => write!(f, "Event {}", self.id),
        }
    }
}
