// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for controller state changes.
//!
//! The presentation layer subscribes to [`ControllerEvent`]s instead of
//! keeping its own copy of which lights exist, which are approved and which
//! effect is playing. The [`EventBus`] uses tokio's broadcast channel to
//! allow multiple subscribers to receive events.
//!
//! # Examples
//!
//! ```
//! use lifx_master::event::{ControllerEvent, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(ControllerEvent::light_discovered("Lamp1"));
//! ```

mod controller_event;
mod event_bus;

pub use controller_event::ControllerEvent;
pub use event_bus::EventBus;
pub(crate) use event_bus::DEFAULT_CHANNEL_CAPACITY;
