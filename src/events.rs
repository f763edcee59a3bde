//! Change-event notification for dynamic containers (§6).
//!
//! No direct precedent exists in the example corpus for an observer
//! pattern on a collection type (the teacher crate is a pure batch/query
//! library with no mutation events), so this follows the idiomatic
//! single-threaded Rust shape for a synchronous callback registry: a list
//! of boxed `FnMut` closures, invoked in subscription order, delivered
//! synchronously before the mutating call returns.

use crate::algebra::Interval;

/// A notification delivered synchronously by a [`DynamicIntervalCollection`](crate::collection::DynamicIntervalCollection)
/// mutation. Exactly one event fires per operation that effects a change;
/// a failed `add` (duplicate rejection) fires none.
pub enum ChangeEvent<'a, T> {
    /// One or more intervals were added.
    ItemsAdded(&'a [Interval<T>]),
    /// One or more intervals were removed.
    ItemsRemoved(&'a [Interval<T>]),
    /// The collection was emptied by `clear()`.
    CollectionCleared,
    /// A catch-all fired alongside any of the above, for listeners that
    /// only care that *something* changed.
    CollectionChanged,
}

/// A mixin providing listener registration and synchronous dispatch.
/// Dynamic engines (IBS, DLFIT) embed one of these and call `notify` at
/// the end of every mutating operation that actually changed state.
#[derive(Default)]
pub struct EventSource<T> {
    listeners: Vec<Box<dyn FnMut(&ChangeEvent<T>)>>,
}

impl<T> EventSource<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Subscribes a listener; listeners fire in subscription order.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ChangeEvent<T>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Delivers `event` to every subscribed listener, in order.
    pub fn notify(&mut self, event: ChangeEvent<T>) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl<T> std::fmt::Debug for EventSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSource")
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}
