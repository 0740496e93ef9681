// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fire-and-forget delivery of commands to lights.
//!
//! Each command is spawned as its own Tokio task and never awaited by the
//! caller. A new command may be issued before earlier ones complete; there is
//! no queueing, coalescing or retry. Failures are logged and published as
//! [`ControllerEvent::CommandFailed`].

use std::sync::Arc;
use std::time::Duration;

use crate::event::{ControllerEvent, EventBus};
use crate::light::{DeviceCommand, Light};
use crate::types::{HsbColor, PowerState};

/// Forwards color and power commands to sets of lights.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    events: EventBus,
}

impl Dispatcher {
    /// Creates a dispatcher that reports failures on `events`.
    #[must_use]
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }

    /// Sends a color change to every light.
    ///
    /// Returns the number of commands issued.
    pub fn set_color<L: Light>(&self, lights: &[Arc<L>], color: HsbColor, duration: Duration) -> usize {
        self.send(lights, DeviceCommand::set_color(color, duration))
    }

    /// Sends a power change to every light.
    ///
    /// Returns the number of commands issued.
    pub fn set_power<L: Light>(&self, lights: &[Arc<L>], state: PowerState) -> usize {
        self.send(lights, DeviceCommand::set_power(state))
    }

    /// Sends one command to every light.
    ///
    /// Returns the number of commands issued.
    pub fn send<L: Light>(&self, lights: &[Arc<L>], command: DeviceCommand) -> usize {
        for light in lights {
            let light = Arc::clone(light);
            let events = self.events.clone();

            tokio::spawn(async move {
                if let Err(error) = command.send_to(light.as_ref()).await {
                    tracing::warn!(
                        label = %light.label(),
                        %command,
                        %error,
                        "Light command failed"
                    );
                    events.publish(ControllerEvent::command_failed(
                        light.label(),
                        command,
                        error,
                    ));
                }
            });
        }
        lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeviceError;
    use crate::light::SimulatedLight;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn set_color_reaches_every_light() {
        let dispatcher = Dispatcher::new(EventBus::new());
        let lights = vec![
            Arc::new(SimulatedLight::new("A")),
            Arc::new(SimulatedLight::new("B")),
        ];

        let issued = dispatcher.set_color(&lights, HsbColor::blue(), Duration::from_secs(1));
        settle().await;

        assert_eq!(issued, 2);
        for light in &lights {
            assert_eq!(
                light.commands(),
                vec![DeviceCommand::set_color(HsbColor::blue(), Duration::from_secs(1))]
            );
        }
    }

    #[tokio::test]
    async fn set_power_reaches_every_light() {
        let dispatcher = Dispatcher::new(EventBus::new());
        let lights = vec![Arc::new(SimulatedLight::new("A"))];

        dispatcher.set_power(&lights, PowerState::On);
        settle().await;

        assert_eq!(lights[0].power_state(), PowerState::On);
    }

    #[tokio::test]
    async fn empty_set_issues_nothing() {
        let dispatcher = Dispatcher::new(EventBus::new());
        let lights: Vec<Arc<SimulatedLight>> = Vec::new();

        assert_eq!(dispatcher.set_power(&lights, PowerState::On), 0);
    }

    #[tokio::test]
    async fn failure_is_published_and_others_still_served() {
        let bus = EventBus::new();
        let mut events = bus.subscribe();
        let dispatcher = Dispatcher::new(bus);

        let broken = Arc::new(SimulatedLight::new("Broken"));
        broken.set_reachable(false);
        let healthy = Arc::new(SimulatedLight::new("Healthy"));

        dispatcher.set_power(&[broken, Arc::clone(&healthy)], PowerState::On);
        settle().await;

        assert_eq!(healthy.power_state(), PowerState::On);
        assert_eq!(
            events.recv().await.unwrap(),
            ControllerEvent::command_failed(
                "Broken",
                DeviceCommand::set_power(PowerState::On),
                DeviceError::Unreachable {
                    label: "Broken".to_string()
                },
            )
        );
    }
}
