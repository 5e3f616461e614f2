//! # typed-emitter
//!
//! A small, typed, synchronous publish/subscribe emitter.
//!
//! ## Features
//!
//! - **Typed** event declarations: listeners of the wrong shape do not compile
//! - **Snapshot** dispatch: listeners may unbind themselves or others mid-emission
//! - **Handles** that identify a registration without owning it
//! - **Thread-safe** registry, callbacks run with no lock held
//!
//! ## Quick Example
//!
//! ```rust
//! use typed_emitter::{Event, EventEmitter};
//!
//! struct Counter {
//!     emitter: EventEmitter,
//!     on_change: Event<(u32, u32)>,
//!     value: u32,
//! }
//!
//! impl Counter {
//!     fn new() -> Self {
//!         let emitter = EventEmitter::new();
//!         let on_change = emitter.register_event().with_name("change");
//!         Self { emitter, on_change, value: 0 }
//!     }
//!
//!     fn on_change(&self) -> &Event<(u32, u32)> {
//!         &self.on_change
//!     }
//!
//!     fn increment(&mut self) {
//!         let old = self.value;
//!         self.value += 1;
//!         self.emitter.notify(&self.on_change, &(old, self.value));
//!     }
//! }
//!
//! let mut counter = Counter::new();
//!
//! // Subscribe through the event
//! let listener = counter.on_change().subscribe(|(old, new): &(u32, u32)| {
//!     println!("{old} -> {new}");
//! });
//!
//! counter.increment();
//!
//! // Unbind when done; doing it twice is harmless
//! listener.unbind();
//! listener.unbind();
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    unreachable_pub
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Typed event identities
pub mod event;

/// Error types and result aliases
pub mod error;

/// Event registry for identity-to-listener mapping
pub mod registry;

/// Callbacks and listener handles
pub mod subscription;

/// The emitter implementation
pub mod emitter;

// Re-export commonly used types
pub use emitter::{EmitterConfig, EmitterStats, EventEmitter, EventEmitterBuilder};
pub use error::{Error, Result};
pub use event::{Event, EventId};
pub use subscription::{Callback, CallbackKey, CallbackResult, Listener};

/// Prelude module for convenient imports
///
/// # Example
/// ```rust
/// use typed_emitter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::emitter::{EmitterConfig, EventEmitter, EventEmitterBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::event::Event;
    pub use crate::subscription::{Callback, Listener};
}
