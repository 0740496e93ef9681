// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light controller for coordinating discovered bulbs.
//!
//! This module provides the API a menu or tray front end talks to.
//!
//! # Overview
//!
//! The [`LightController`] is the central component. It provides:
//!
//! - **Approval tracking**: Only lights the user approved receive commands
//! - **Effect playback**: One effect at a time, driven by a periodic timer
//! - **Power toggle**: Switch every approved light on or off at once
//! - **Manual color**: Apply a color chosen with sliders, stopping any effect
//! - **Event system**: Subscribe to controller events via broadcast channels
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use lifx_master::controller::{ControllerConfig, LightController};
//! use lifx_master::light::SimulatedLight;
//! use lifx_master::types::HsbColor;
//!
//! #[tokio::main]
//! async fn main() -> lifx_master::Result<()> {
//!     let config = ControllerConfig::new().with_pruning(true);
//!     let controller = LightController::with_config(config)?;
//!
//!     let mut events = controller.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("{event:?}");
//!         }
//!     });
//!
//!     controller.on_light_discovered(Arc::new(SimulatedLight::new("Desk")));
//!     controller.set_approval("Desk", true)?;
//!     controller.set_manual_color(HsbColor::amber())?;
//!
//!     Ok(())
//! }
//! ```

mod config;
mod light_controller;
mod scheduler;

pub use config::ControllerConfig;
pub use light_controller::LightController;
