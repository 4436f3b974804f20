// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single configuration cell: a keyed, named, typed scalar or vector.

use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::ErasedSlot;

enum Slot {
    Scalar(ErasedSlot),
    Vector { elem: TypeId, items: Vec<ErasedSlot> },
}

/// A property cell: unique key, display name, and a scalar or vector value
/// of one concrete type.
///
/// The value type is fixed at construction. All typed accessors check the
/// stored type and **panic** on mismatch, including reading a vector
/// property through a scalar accessor or vice versa. Such an access is a
/// contract violation by the calling code, not a data error, so it fails
/// fast rather than returning a recoverable result.
///
/// # Example
///
/// ```
/// use canopy_property::Property;
///
/// let mut gap = Property::scalar("GAP", "Gap", 1_i32);
/// assert_eq!(*gap.value::<i32>(), 1);
/// gap.set(4_i32);
/// assert_eq!(*gap.value::<i32>(), 4);
///
/// let mut sizes = Property::vector("SIZES", "Available sizes", vec![10_i32, 20]);
/// sizes.push(30_i32);
/// assert_eq!(sizes.items::<i32>(), [10, 20, 30]);
/// ```
pub struct Property {
    key: &'static str,
    name: &'static str,
    slot: Slot,
}

impl Property {
    /// Creates a scalar property.
    #[must_use]
    pub fn scalar<T: Clone + 'static>(key: &'static str, name: &'static str, value: T) -> Self {
        Self {
            key,
            name,
            slot: Slot::Scalar(ErasedSlot::new(value)),
        }
    }

    /// Creates a vector property with elements of type `T`.
    ///
    /// The element type is remembered even when `items` is empty.
    #[must_use]
    pub fn vector<T: Clone + 'static>(
        key: &'static str,
        name: &'static str,
        items: Vec<T>,
    ) -> Self {
        Self {
            key,
            name,
            slot: Slot::Vector {
                elem: TypeId::of::<T>(),
                items: items.into_iter().map(ErasedSlot::new).collect(),
            },
        }
    }

    /// Returns the unique key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this is a vector property.
    #[must_use]
    pub fn is_vector(&self) -> bool {
        matches!(self.slot, Slot::Vector { .. })
    }

    /// Returns a reference to the scalar value.
    ///
    /// # Panics
    ///
    /// Panics if this is a vector property or the stored type is not `T`.
    #[must_use]
    pub fn value<T: 'static>(&self) -> &T {
        match &self.slot {
            Slot::Scalar(slot) => slot.downcast_ref::<T>().unwrap_or_else(|| {
                panic!("property '{}' does not hold the requested scalar type", self.key)
            }),
            Slot::Vector { .. } => {
                panic!("property '{}' is a vector, not a scalar", self.key)
            }
        }
    }

    /// Replaces the scalar value.
    ///
    /// # Panics
    ///
    /// Panics if this is a vector property or the stored type is not `T`.
    pub fn set<T: Clone + 'static>(&mut self, value: T) {
        match &mut self.slot {
            Slot::Scalar(slot) => {
                assert!(
                    slot.is::<T>(),
                    "property '{}' does not hold the assigned scalar type",
                    self.key
                );
                *slot = ErasedSlot::new(value);
            }
            Slot::Vector { .. } => {
                panic!("property '{}' is a vector, not a scalar", self.key)
            }
        }
    }

    /// Returns the vector elements, cloned.
    ///
    /// # Panics
    ///
    /// Panics if this is a scalar property or the element type is not `T`.
    #[must_use]
    pub fn items<T: Clone + 'static>(&self) -> Vec<T> {
        match &self.slot {
            Slot::Vector { elem, items } => {
                assert!(
                    *elem == TypeId::of::<T>(),
                    "property '{}' does not hold elements of the requested type",
                    self.key
                );
                items
                    .iter()
                    .map(|slot| {
                        slot.downcast_ref::<T>()
                            .expect("element type was checked against the vector")
                            .clone()
                    })
                    .collect()
            }
            Slot::Scalar(_) => {
                panic!("property '{}' is a scalar, not a vector", self.key)
            }
        }
    }

    /// Appends an element to the vector.
    ///
    /// # Panics
    ///
    /// Panics if this is a scalar property or the element type is not `T`.
    pub fn push<T: Clone + 'static>(&mut self, value: T) {
        match &mut self.slot {
            Slot::Vector { elem, items } => {
                assert!(
                    *elem == TypeId::of::<T>(),
                    "property '{}' does not hold elements of the assigned type",
                    self.key
                );
                items.push(ErasedSlot::new(value));
            }
            Slot::Scalar(_) => {
                panic!("property '{}' is a scalar, not a vector", self.key)
            }
        }
    }

    /// Removes all elements from the vector.
    ///
    /// # Panics
    ///
    /// Panics if this is a scalar property.
    pub fn clear(&mut self) {
        match &mut self.slot {
            Slot::Vector { items, .. } => items.clear(),
            Slot::Scalar(_) => {
                panic!("property '{}' is a scalar, not a vector", self.key)
            }
        }
    }

    /// Shorthand for `*self.value::<i32>()`.
    #[must_use]
    pub fn int(&self) -> i32 {
        *self.value::<i32>()
    }

    /// Shorthand for `*self.value::<bool>()`.
    #[must_use]
    pub fn boolean(&self) -> bool {
        *self.value::<bool>()
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("is_vector", &self.is_vector())
            .finish_non_exhaustive()
    }
}
