//! Listener callbacks and their identity.

use std::any::Any;
use std::convert::Infallible;
use std::fmt;
use std::sync::{Arc, Weak};

/// Listener function shared between the registry and handles.
struct CallbackFn<A, E> {
    f: Box<dyn Fn(&A) -> Result<(), E> + Send + Sync>,
}

/// Return types a listener closure may produce.
///
/// Closures that cannot fail return `()`; fallible ones return
/// `Result<(), E>` and stop the emission on `Err`.
pub trait CallbackResult<E> {
    /// Normalize into the result the emitter propagates
    fn into_result(self) -> Result<(), E>;
}

impl<E> CallbackResult<E> for () {
    fn into_result(self) -> Result<(), E> {
        Ok(())
    }
}

impl<E> CallbackResult<E> for Result<(), E> {
    fn into_result(self) -> Result<(), E> {
        self
    }
}

/// A listener function with reference identity.
///
/// Cloning a `Callback` yields the same callback: both clones compare equal
/// and removing one removes registrations made with either. Two separate
/// calls to [`Callback::new`] always produce distinct callbacks, even for
/// identical closures.
///
/// # Example
///
/// ```rust
/// use typed_emitter::{Callback, EventEmitter};
///
/// let emitter = EventEmitter::new();
/// let on_saved = emitter.register_event::<String>();
///
/// let log: Callback<String> = Callback::new(|path: &String| println!("saved {path}"));
/// on_saved.subscribe_callback(&log);
/// on_saved.subscribe_callback(&log);
/// assert_eq!(emitter.listener_count(&on_saved), 2);
///
/// // Removal by callback takes every registration sharing its identity.
/// assert_eq!(emitter.remove_by_identity(&on_saved, Some(&log)), 2);
/// ```
pub struct Callback<A, E = Infallible> {
    inner: Arc<CallbackFn<A, E>>,
}

impl<A, E> Callback<A, E> {
    /// Wrap a closure into a new, uniquely identified callback
    pub fn new<F, R>(f: F) -> Self
    where
        A: 'static,
        E: 'static,
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: CallbackResult<E>,
    {
        Self {
            inner: Arc::new(CallbackFn {
                f: Box::new(move |args: &A| f(args).into_result()),
            }),
        }
    }

    /// Run the callback
    pub fn call(&self, args: &A) -> Result<(), E> {
        (self.inner.f)(args)
    }

    /// Identity of this callback, shared by all its clones
    pub fn key(&self) -> CallbackKey {
        CallbackKey(Arc::as_ptr(&self.inner).cast::<()>() as usize)
    }

    /// Weak reference to the callback's allocation.
    ///
    /// Keeps the key reserved without keeping the closure or its captures
    /// alive.
    pub(crate) fn downgrade(&self) -> Weak<dyn Any + Send + Sync>
    where
        A: 'static,
        E: 'static,
    {
        let weak: Weak<CallbackFn<A, E>> = Arc::downgrade(&self.inner);
        weak
    }

    /// Check whether two values are the same callback
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<A, E> Clone for Callback<A, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, E> PartialEq for Callback<A, E> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<A, E> Eq for Callback<A, E> {}

impl<A, E> fmt::Debug for Callback<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.key()).finish()
    }
}

/// Opaque identity of a [`Callback`].
///
/// Derived from the callback's allocation. Registrations hold the callback
/// strongly and handles weakly; either keeps the allocation reserved, so a
/// key cannot be reused while anything still refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackKey(usize);
