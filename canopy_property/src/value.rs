// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased storage for a single property value.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

/// A type-erased property value.
///
/// Wraps a value of any `'static + Clone` type, keeping its [`TypeId`] so
/// accesses can be checked before downcasting. This is the storage cell
/// behind every scalar property and every vector element.
///
/// # Example
///
/// ```
/// use canopy_property::ErasedSlot;
///
/// let slot = ErasedSlot::new(3_i32);
/// assert!(slot.is::<i32>());
/// assert_eq!(slot.downcast_ref::<i32>(), Some(&3));
/// assert_eq!(slot.downcast_ref::<bool>(), None);
/// ```
pub struct ErasedSlot {
    inner: Box<dyn CloneAny>,
    type_id: TypeId,
}

impl ErasedSlot {
    /// Creates a slot from a concrete value.
    #[must_use]
    pub fn new<T: Clone + 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            inner: Box::new(value),
        }
    }

    /// Returns the [`TypeId`] of the contained value.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns `true` if the contained value is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Attempts to downcast to a reference of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.is::<T>() {
            self.inner.as_any().downcast_ref()
        } else {
            None
        }
    }
}

impl Clone for ErasedSlot {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
            type_id: self.type_id,
        }
    }
}

impl fmt::Debug for ErasedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedSlot")
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}

/// Trait object for erased values that can be cloned.
trait CloneAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn CloneAny>;
}

impl<T: Clone + 'static> CloneAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn CloneAny> {
        Box::new(self.clone())
    }
}
