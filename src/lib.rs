// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `LIFX Master` - A Rust library to drive smart bulbs from a menu.
//!
//! This library holds the state behind a small status-bar utility: which
//! bulbs were discovered on the network, which of them the user approved,
//! which lighting effect is playing, and whether the approved bulbs are on.
//! Network discovery and the device protocol are provided by the caller
//! through the [`Light`](light::Light) trait and a [`discovery`] feed.
//!
//! # Supported Features
//!
//! - **Approval**: Per-light opt-in, remembered across network drop-outs
//! - **Effects**: Solid, rainbow, random and cycling color effects
//! - **Power control**: Toggle all approved lights at once
//! - **Manual color**: Hue, saturation and brightness sliders
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use lifx_master::{EffectCatalog, LightController, SimulatedLight};
//!
//! #[tokio::main]
//! async fn main() -> lifx_master::Result<()> {
//!     let controller = LightController::new();
//!
//!     // Feed discovery reports
//!     let (feed, rx) = lifx_master::discovery::channel(16);
//!     controller.spawn_discovery_listener(rx);
//!     feed.discovered(Arc::new(SimulatedLight::new("Lamp1"))).await?;
//!
//!     # tokio::task::yield_now().await;
//!     // Approve and play an effect
//!     controller.set_approval("Lamp1", true)?;
//!     controller.select_effect(EffectCatalog::SLOW_RAINBOW)?;
//!
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod discovery;
pub mod dispatch;
pub mod effect;
pub mod error;
pub mod event;
pub mod light;
pub mod registry;
pub mod types;

pub use controller::{ControllerConfig, LightController};
pub use effect::{Effect, EffectCatalog, Pattern};
pub use error::{ConfigError, DeviceError, Error, Result, ValueError};
pub use event::{ControllerEvent, EventBus};
pub use light::{DeviceCommand, Light, SimulatedLight};
pub use registry::{LightEntry, LightRegistry};
pub use types::{HsbColor, PowerState};
