// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A keyed set of properties with defaults and change notification.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::Property;

/// Callback invoked with the key of a changed property.
type Listener = Box<dyn FnMut(&'static str)>;

/// Handle returned by [`Configuration::subscribe`], used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// A set of [`Property`] cells used to configure tree visualizations.
///
/// Multiple views can share one configuration; any mutation made through the
/// configuration notifies subscribed listeners with the affected key and
/// bumps a monotonic [generation](Configuration::generation) counter.
/// Renderers register their keys with defaults via
/// [`add_if_absent`](Configuration::add_if_absent) and read them back with
/// the typed accessors.
///
/// Looking up a missing key, or accessing a property through the wrong type,
/// panics: both are programmer errors, not runtime data errors.
pub struct Configuration {
    properties: HashMap<&'static str, Property>,
    listeners: SmallVec<[Option<Listener>; 2]>,
    generation: u64,
}

impl Configuration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: HashMap::new(),
            listeners: SmallVec::new(),
            generation: 0,
        }
    }

    /// Adds `property` unless a property with the same key already exists.
    ///
    /// Returns `true` (and notifies listeners) if the property was added.
    /// This is how renderers install their defaults without clobbering
    /// values an embedder configured beforehand.
    pub fn add_if_absent(&mut self, property: Property) -> bool {
        let key = property.key();
        if self.properties.contains_key(key) {
            false
        } else {
            self.properties.insert(key, property);
            self.notify(key);
            true
        }
    }

    /// Adds `property`, replacing any existing property with the same key.
    pub fn add_or_replace(&mut self, property: Property) {
        let key = property.key();
        self.properties.insert(key, property);
        self.notify(key);
    }

    /// Returns `true` if a property with `key` exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Returns the property with `key`.
    ///
    /// # Panics
    ///
    /// Panics if no property with `key` exists.
    #[must_use]
    pub fn lookup(&self, key: &str) -> &Property {
        self.properties
            .get(key)
            .unwrap_or_else(|| panic!("configuration has no property with key '{key}'"))
    }

    /// Returns a clone of the scalar value of the property with `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing, the property is a vector, or the stored
    /// type is not `T`.
    #[must_use]
    pub fn value<T: Clone + 'static>(&self, key: &str) -> T {
        self.lookup(key).value::<T>().clone()
    }

    /// Replaces the scalar value of the property with `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing, the property is a vector, or the stored
    /// type is not `T`.
    pub fn set_value<T: Clone + 'static>(&mut self, key: &'static str, value: T) {
        self.lookup_mut(key).set(value);
        self.notify(key);
    }

    /// Returns the vector elements of the property with `key`, cloned.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing, the property is a scalar, or the
    /// element type is not `T`.
    #[must_use]
    pub fn items<T: Clone + 'static>(&self, key: &str) -> Vec<T> {
        self.lookup(key).items::<T>()
    }

    /// Appends an element to the vector property with `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing, the property is a scalar, or the
    /// element type is not `T`.
    pub fn push_item<T: Clone + 'static>(&mut self, key: &'static str, value: T) {
        self.lookup_mut(key).push(value);
        self.notify(key);
    }

    /// Removes all elements from the vector property with `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing or the property is a scalar.
    pub fn clear_items(&mut self, key: &'static str) {
        self.lookup_mut(key).clear();
        self.notify(key);
    }

    /// Shorthand for `self.value::<i32>(key)`.
    #[must_use]
    pub fn int(&self, key: &str) -> i32 {
        self.lookup(key).int()
    }

    /// Shorthand for `self.set_value::<i32>(key, value)`.
    pub fn set_int(&mut self, key: &'static str, value: i32) {
        self.set_value(key, value);
    }

    /// Shorthand for `self.value::<bool>(key)`.
    #[must_use]
    pub fn boolean(&self, key: &str) -> bool {
        self.lookup(key).boolean()
    }

    /// Shorthand for `self.set_value::<bool>(key, value)`.
    pub fn set_boolean(&mut self, key: &'static str, value: bool) {
        self.set_value(key, value);
    }

    /// Registers a listener invoked with the key of every changed property.
    ///
    /// Notification order across listeners is unspecified and must not be
    /// relied upon.
    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.listeners.len());
        self.listeners.push(Some(listener));
        id
    }

    /// Removes a previously registered listener.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        if let Some(slot) = self.listeners.get_mut(id.0) {
            *slot = None;
        }
    }

    /// Returns a counter that increases on every change.
    ///
    /// Hosts can remember the value observed at the last render pass to
    /// decide cheaply whether anything changed since.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn lookup_mut(&mut self, key: &str) -> &mut Property {
        self.properties
            .get_mut(key)
            .unwrap_or_else(|| panic!("configuration has no property with key '{key}'"))
    }

    fn notify(&mut self, key: &'static str) {
        self.generation += 1;
        for slot in &mut self.listeners {
            if let Some(listener) = slot {
                listener(key);
            }
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.properties.keys().copied().collect();
        keys.sort_unstable();
        f.debug_struct("Configuration")
            .field("keys", &keys)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
