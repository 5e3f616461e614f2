//! DashMap-based implementation of EventRegistry for concurrent access.

use super::{EventRegistry, Registration};
use crate::event::EventId;
use crate::subscription::CallbackKey;
use dashmap::DashMap;
use tracing::trace;

/// A thread-safe event registry implementation using DashMap.
///
/// Each event's sequence lives behind its shard lock. Snapshots clone the
/// sequence (reference-count bumps only) and release the lock before
/// returning, so callbacks may re-enter the registry freely.
#[derive(Debug, Default)]
pub struct DashMapRegistry {
    /// Map from event identity to its ordered registrations
    listeners: DashMap<EventId, Vec<Registration>>,
}

impl DashMapRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
        }
    }

    /// Create a registry with pre-allocated capacity for `events` events
    pub fn with_capacity(events: usize) -> Self {
        Self {
            listeners: DashMap::with_capacity(events),
        }
    }
}

impl EventRegistry for DashMapRegistry {
    fn register(&self, event: EventId, registration: Registration) -> usize {
        trace!(event_id = %event, key = ?registration.key, "Registering listener");

        let mut regs = self.listeners.entry(event).or_default();
        regs.push(registration);
        regs.len()
    }

    fn remove(&self, event: EventId, key: Option<CallbackKey>) -> usize {
        let Some(key) = key else {
            let removed = self
                .listeners
                .remove(&event)
                .map(|(_, regs)| regs.len())
                .unwrap_or(0);
            trace!(event_id = %event, removed, "Removed all listeners for event");
            return removed;
        };

        let removed = match self.listeners.get_mut(&event) {
            Some(mut regs) => {
                let before = regs.len();
                regs.retain(|r| r.key != key);
                before - regs.len()
            }
            None => 0,
        };

        // Drop the slot once empty; re-checked under the lock in case a
        // listener was added in between.
        self.listeners.remove_if(&event, |_, regs| regs.is_empty());

        trace!(event_id = %event, ?key, removed, "Removed listener");
        removed
    }

    fn contains(&self, event: EventId, key: CallbackKey) -> bool {
        self.listeners
            .get(&event)
            .map(|regs| regs.iter().any(|r| r.key == key))
            .unwrap_or(false)
    }

    fn snapshot(&self, event: EventId) -> Vec<Registration> {
        self.listeners
            .get(&event)
            .map(|regs| regs.value().clone())
            .unwrap_or_default()
    }

    fn listener_count(&self, event: EventId) -> usize {
        self.listeners
            .get(&event)
            .map(|regs| regs.len())
            .unwrap_or(0)
    }

    fn total_listeners(&self) -> usize {
        self.listeners.iter().map(|entry| entry.value().len()).sum()
    }

    fn event_ids(&self) -> Vec<EventId> {
        self.listeners.iter().map(|entry| *entry.key()).collect()
    }

    fn clear(&self) {
        self.listeners.clear();
    }
}
