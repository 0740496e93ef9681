// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device-control seam for smart bulbs.
//!
//! The controller never speaks a network protocol itself. It drives lights
//! through the [`Light`] trait, which a binding to a vendor SDK (or the
//! in-crate [`SimulatedLight`]) implements.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use lifx_master::light::{Light, SimulatedLight};
//! use lifx_master::types::{HsbColor, PowerState};
//!
//! # async fn example() -> Result<(), lifx_master::error::DeviceError> {
//! let lamp = SimulatedLight::new("Lamp1");
//! lamp.set_power(PowerState::On).await?;
//! lamp.set_color(HsbColor::blue(), Duration::from_millis(500)).await?;
//! assert_eq!(lamp.color(), HsbColor::blue());
//! # Ok(())
//! # }
//! ```

mod simulated;

pub use simulated::SimulatedLight;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::error::DeviceError;
use crate::types::{HsbColor, PowerState};

/// A controllable bulb owned by an external device-control collaborator.
///
/// The controller only holds `Arc` handles to lights and never manages their
/// lifecycle. Lights are identified by their label, which must be unique
/// among the lights reported by one discovery feed.
///
/// Command futures are spawned onto the Tokio runtime and never awaited by
/// the controller, so implementations should not rely on being polled to
/// completion in order.
pub trait Light: Send + Sync + 'static {
    /// Returns the user-visible label of the light.
    fn label(&self) -> &str;

    /// Returns the last known power state of the light.
    fn power_state(&self) -> PowerState;

    /// Changes the light color over the given transition duration.
    ///
    /// A zero duration requests an instant change.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError` if the light cannot execute the command.
    fn set_color(
        &self,
        color: HsbColor,
        duration: Duration,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Switches the light on or off.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError` if the light cannot execute the command.
    fn set_power(&self, state: PowerState) -> impl Future<Output = Result<(), DeviceError>> + Send;
}

/// A single command sent to a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceCommand {
    /// Change color over a transition duration.
    SetColor {
        /// Target color.
        color: HsbColor,
        /// Transition duration.
        duration: Duration,
    },
    /// Change power state.
    SetPower(PowerState),
}

impl DeviceCommand {
    /// Creates a color command.
    #[must_use]
    pub fn set_color(color: HsbColor, duration: Duration) -> Self {
        Self::SetColor { color, duration }
    }

    /// Creates a power command.
    #[must_use]
    pub fn set_power(state: PowerState) -> Self {
        Self::SetPower(state)
    }

    /// Sends this command to a light.
    ///
    /// # Errors
    ///
    /// Returns whatever error the light reports.
    pub async fn send_to<L: Light>(self, light: &L) -> Result<(), DeviceError> {
        match self {
            Self::SetColor { color, duration } => light.set_color(color, duration).await,
            Self::SetPower(state) => light.set_power(state).await,
        }
    }

    /// Returns the color carried by this command, if any.
    #[must_use]
    pub fn color(&self) -> Option<HsbColor> {
        match self {
            Self::SetColor { color, .. } => Some(*color),
            Self::SetPower(_) => None,
        }
    }

    /// Returns the power state carried by this command, if any.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        match self {
            Self::SetPower(state) => Some(*state),
            Self::SetColor { .. } => None,
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetColor { color, duration } => {
                write!(f, "set color {color} over {}ms", duration.as_millis())
            }
            Self::SetPower(state) => write!(f, "set power {state}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_accessors() {
        let color = DeviceCommand::set_color(HsbColor::red(), Duration::ZERO);
        assert_eq!(color.color(), Some(HsbColor::red()));
        assert_eq!(color.power(), None);

        let power = DeviceCommand::set_power(PowerState::On);
        assert_eq!(power.power(), Some(PowerState::On));
        assert_eq!(power.color(), None);
    }

    #[test]
    fn command_display() {
        let cmd = DeviceCommand::set_color(HsbColor::green(), Duration::from_millis(500));
        assert_eq!(cmd.to_string(), "set color HSB(120.0, 100%, 100%) over 500ms");
        assert_eq!(
            DeviceCommand::set_power(PowerState::Off).to_string(),
            "set power OFF"
        );
    }

    #[tokio::test]
    async fn send_to_routes_by_variant() {
        let lamp = SimulatedLight::new("Lamp1");

        DeviceCommand::set_power(PowerState::On)
            .send_to(&lamp)
            .await
            .unwrap();
        DeviceCommand::set_color(HsbColor::amber(), Duration::ZERO)
            .send_to(&lamp)
            .await
            .unwrap();

        assert_eq!(lamp.power_state(), PowerState::On);
        assert_eq!(lamp.color(), HsbColor::amber());
    }
}
