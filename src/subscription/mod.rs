//! Subscription management for listeners.
//!
//! [`Callback`] is the function value a listener is made of; its identity is
//! what removal by callback compares. [`Listener`] is the handle returned by
//! every subscribe call.

pub mod callback;
pub mod handle;

pub use callback::{Callback, CallbackKey, CallbackResult};
pub use handle::Listener;
