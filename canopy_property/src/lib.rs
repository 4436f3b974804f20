// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Property: dynamic typed configuration storage.
//!
//! A [`Configuration`] is a keyed set of [`Property`] cells used to
//! parameterize Canopy renderers: gap sizes, cutoff thresholds, label
//! visibility modes, colors. Multiple views can share one configuration, so
//! adjusting a knob in one view updates all of them; changes fan out through
//! explicit observer callbacks and a monotonic generation counter.
//!
//! ## Core concepts
//!
//! - **Typed cells**: each property holds a scalar or a vector of one
//!   concrete Rust type behind a type-erased box ([`ErasedSlot`]). Reading or
//!   writing with the wrong type is a *programmer error* and panics
//!   immediately; it is never a recoverable runtime condition.
//! - **Defaults**: [`Configuration::add_if_absent`] lets each renderer
//!   register its keys with default values without clobbering values an
//!   embedder already set.
//! - **Change notification**: [`Configuration::subscribe`] registers a
//!   callback invoked with the key of every changed property, and
//!   [`Configuration::generation`] supports cheap "anything changed?"
//!   polling. Notification order across listeners is unspecified.
//!
//! ## Quick start
//!
//! ```
//! use canopy_property::{Configuration, Property};
//!
//! let mut config = Configuration::new();
//! config.add_if_absent(Property::scalar("GAP", "Gap", 3_i32));
//!
//! assert_eq!(config.int("GAP"), 3);
//! config.set_int("GAP", 5);
//! assert_eq!(config.int("GAP"), 5);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod property;
mod value;

pub use config::{Configuration, ListenerId};
pub use property::Property;
pub use value::ErasedSlot;
