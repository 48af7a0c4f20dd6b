// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for value streams.
//!
//! This module provides the core types for managing subscription callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks
//!
//! The same registry backs both directions of the bridge: entity state
//! streams (inbound) and characteristic change notifications (outbound).

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Unique identifier for a subscription.
///
/// This ID is returned when creating a subscription and can be used to
/// unsubscribe later. IDs are unique within a registry's lifetime and
/// increase with registration order.
///
/// # Examples
///
/// ```
/// use esphome_bridge::subscription::CallbackRegistry;
///
/// let registry = CallbackRegistry::<f64>::new();
/// let id = registry.subscribe(|value| println!("got {value}"));
/// assert!(registry.unsubscribe(id));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Registry for managing subscription callbacks of one payload type.
///
/// It uses thread-safe interior mutability via `parking_lot::RwLock`.
/// Callbacks are stored in registration order and invoked in that order,
/// so a single subscriber always observes values in the order they were
/// dispatched.
///
/// # Thread Safety
///
/// The registry can be shared between threads. Dispatch takes a snapshot
/// of the callbacks and releases the lock before invoking them, so a
/// callback may subscribe or unsubscribe without deadlocking.
pub struct CallbackRegistry<T: ?Sized> {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    callbacks: RwLock<BTreeMap<SubscriptionId, Callback<T>>>,
}

impl<T: ?Sized> CallbackRegistry<T> {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            callbacks: RwLock::new(BTreeMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a callback and returns its subscription ID.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.callbacks.write().clear();
    }

    /// Dispatches a value to every registered callback, in registration
    /// order.
    pub fn dispatch(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self.callbacks.read().values().cloned().collect();
        for callback in snapshot {
            callback(value);
        }
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl<T: ?Sized> Default for CallbackRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> std::fmt::Debug for CallbackRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
    }

    #[test]
    fn subscription_id_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(SubscriptionId::new(1));
        set.insert(SubscriptionId::new(2));
        set.insert(SubscriptionId::new(1)); // Duplicate

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::<u32>::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn registry_subscribe_dispatch_unsubscribe() {
        let registry = CallbackRegistry::<u32>::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.subscribe(move |value| {
            counter_clone.fetch_add(*value, Ordering::SeqCst);
        });
        assert_eq!(registry.callback_count(), 1);

        registry.dispatch(&5);
        assert_eq!(counter.load(Ordering::SeqCst), 5);

        assert!(registry.unsubscribe(id));
        assert!(registry.is_empty());

        // Dispatch again - counter should not change
        registry.dispatch(&5);
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn registry_preserves_dispatch_order() {
        let registry = CallbackRegistry::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        registry.subscribe(move |value| seen_clone.lock().push(*value));

        for value in [3, 1, 4, 1, 5] {
            registry.dispatch(&value);
        }

        assert_eq!(*seen.lock(), vec![3, 1, 4, 1, 5]);
    }

    #[test]
    fn registry_invokes_in_registration_order() {
        let registry = CallbackRegistry::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            registry.subscribe(move |_| seen.lock().push(tag));
        }

        registry.dispatch(&0);
        assert_eq!(*seen.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn registry_unsubscribe_nonexistent() {
        let registry = CallbackRegistry::<u32>::new();
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
    }

    #[test]
    fn registry_clear() {
        let registry = CallbackRegistry::<u32>::new();
        registry.subscribe(|_| {});
        registry.subscribe(|_| {});

        assert_eq!(registry.callback_count(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_callback_may_unsubscribe_itself() {
        let registry = Arc::new(CallbackRegistry::<u32>::new());
        let slot = Arc::new(Mutex::new(None::<SubscriptionId>));

        let registry_clone = registry.clone();
        let slot_clone = slot.clone();
        let id = registry.subscribe(move |_| {
            if let Some(id) = slot_clone.lock().take() {
                registry_clone.unsubscribe(id);
            }
        });
        *slot.lock() = Some(id);

        registry.dispatch(&1);
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_unique_ids() {
        let registry = CallbackRegistry::<u32>::new();

        let id1 = registry.subscribe(|_| {});
        let id2 = registry.subscribe(|_| {});

        assert_ne!(id1, id2);
        assert!(id1 < id2);
    }

    #[test]
    fn registry_debug() {
        let registry = CallbackRegistry::<u32>::new();
        registry.subscribe(|_| {});

        let debug = format!("{registry:?}");
        assert!(debug.contains("CallbackRegistry"));
        assert!(debug.contains("callback_count"));
    }
}
