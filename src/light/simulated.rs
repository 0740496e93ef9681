// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory virtual bulb.

use std::time::Duration;

use parking_lot::RwLock;

use crate::error::DeviceError;
use crate::types::{HsbColor, PowerState};

use super::{DeviceCommand, Light};

/// A virtual bulb that keeps its state in memory.
///
/// Every accepted command is appended to a log that can be inspected with
/// [`commands`](Self::commands). The light can be made unreachable to
/// exercise failure handling; rejected commands are not logged.
///
/// # Examples
///
/// ```
/// use lifx_master::light::SimulatedLight;
/// use lifx_master::types::PowerState;
///
/// let lamp = SimulatedLight::new("Desk").with_power(PowerState::On);
/// lamp.set_reachable(false);
/// assert!(!lamp.is_reachable());
/// ```
#[derive(Debug)]
pub struct SimulatedLight {
    label: String,
    state: RwLock<SimulatedState>,
}

#[derive(Debug)]
struct SimulatedState {
    power: PowerState,
    color: HsbColor,
    reachable: bool,
    commands: Vec<DeviceCommand>,
}

impl SimulatedLight {
    /// Creates a reachable light that is off and white.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: RwLock::new(SimulatedState {
                power: PowerState::Off,
                color: HsbColor::white(),
                reachable: true,
                commands: Vec::new(),
            }),
        }
    }

    /// Sets the initial power state.
    #[must_use]
    pub fn with_power(self, power: PowerState) -> Self {
        self.state.write().power = power;
        self
    }

    /// Sets the initial color.
    #[must_use]
    pub fn with_color(self, color: HsbColor) -> Self {
        self.state.write().color = color;
        self
    }

    /// Makes the light accept or reject subsequent commands.
    pub fn set_reachable(&self, reachable: bool) {
        self.state.write().reachable = reachable;
    }

    /// Returns `true` if the light accepts commands.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.state.read().reachable
    }

    /// Returns the current color.
    #[must_use]
    pub fn color(&self) -> HsbColor {
        self.state.read().color
    }

    /// Returns a copy of every accepted command, oldest first.
    #[must_use]
    pub fn commands(&self) -> Vec<DeviceCommand> {
        self.state.read().commands.clone()
    }

    /// Returns the colors of every accepted color command, oldest first.
    #[must_use]
    pub fn color_history(&self) -> Vec<HsbColor> {
        self.state
            .read()
            .commands
            .iter()
            .filter_map(DeviceCommand::color)
            .collect()
    }

    /// Clears the command log.
    pub fn clear_commands(&self) {
        self.state.write().commands.clear();
    }

    fn accept(&self, command: DeviceCommand) -> Result<(), DeviceError> {
        let mut state = self.state.write();
        if !state.reachable {
            return Err(DeviceError::Unreachable {
                label: self.label.clone(),
            });
        }

        match command {
            DeviceCommand::SetColor { color, .. } => state.color = color,
            DeviceCommand::SetPower(power) => state.power = power,
        }
        state.commands.push(command);

        tracing::trace!(label = %self.label, %command, "Simulated light accepted command");
        Ok(())
    }
}

impl Light for SimulatedLight {
    fn label(&self) -> &str {
        &self.label
    }

    fn power_state(&self) -> PowerState {
        self.state.read().power
    }

    async fn set_color(&self, color: HsbColor, duration: Duration) -> Result<(), DeviceError> {
        self.accept(DeviceCommand::set_color(color, duration))
    }

    async fn set_power(&self, state: PowerState) -> Result<(), DeviceError> {
        self.accept(DeviceCommand::set_power(state))
    }
}
