// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller event types.

use crate::error::DeviceError;
use crate::light::DeviceCommand;
use crate::types::{HsbColor, PowerState};

/// Events emitted by the light controller.
///
/// # Examples
///
/// ```
/// use lifx_master::event::ControllerEvent;
///
/// let event = ControllerEvent::approval_changed("Lamp1", true);
/// assert_eq!(event.label(), Some("Lamp1"));
/// assert!(!event.is_failure());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// A light appeared on the discovery feed.
    LightDiscovered {
        /// Label of the light.
        label: String,
    },

    /// A light left the discovery feed.
    LightRemoved {
        /// Label of the light.
        label: String,
    },

    /// The user approved or disapproved a light.
    ApprovalChanged {
        /// Label of the light.
        label: String,
        /// New approval.
        approved: bool,
    },

    /// An effect was selected and its first tick applied.
    EffectStarted {
        /// Catalog index of the effect.
        index: usize,
        /// Display name of the effect.
        name: String,
    },

    /// The active effect was cancelled.
    EffectStopped {
        /// Catalog index of the cancelled effect.
        index: usize,
    },

    /// Approved lights were switched on or off.
    PowerToggled {
        /// Power state sent to the lights.
        state: PowerState,
    },

    /// A manual color was sent to the approved lights.
    ManualColorApplied {
        /// Color sent to the lights.
        color: HsbColor,
    },

    /// A light failed to execute a command.
    ///
    /// The controller keeps running; the failed command is not retried.
    CommandFailed {
        /// Label of the light.
        label: String,
        /// The command that failed.
        command: DeviceCommand,
        /// Error reported by the light.
        error: DeviceError,
    },
}

impl ControllerEvent {
    /// Returns the light label associated with this event, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::LightDiscovered { label }
            | Self::LightRemoved { label }
            | Self::ApprovalChanged { label, .. }
            | Self::CommandFailed { label, .. } => Some(label),
            Self::EffectStarted { .. }
            | Self::EffectStopped { .. }
            | Self::PowerToggled { .. }
            | Self::ManualColorApplied { .. } => None,
        }
    }

    /// Returns `true` if this is a light lifecycle event (discovered/removed).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::LightDiscovered { .. } | Self::LightRemoved { .. }
        )
    }

    /// Returns `true` if this is an effect start/stop event.
    #[must_use]
    pub fn is_effect(&self) -> bool {
        matches!(self, Self::EffectStarted { .. } | Self::EffectStopped { .. })
    }

    /// Returns `true` if this reports a failed device command.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }

    /// Creates a light discovered event.
    #[must_use]
    pub fn light_discovered(label: impl Into<String>) -> Self {
        Self::LightDiscovered {
            label: label.into(),
        }
    }

    /// Creates a light removed event.
    #[must_use]
    pub fn light_removed(label: impl Into<String>) -> Self {
        Self::LightRemoved {
            label: label.into(),
        }
    }

    /// Creates an approval changed event.
    #[must_use]
    pub fn approval_changed(label: impl Into<String>, approved: bool) -> Self {
        Self::ApprovalChanged {
            label: label.into(),
            approved,
        }
    }

    /// Creates an effect started event.
    #[must_use]
    pub fn effect_started(index: usize, name: impl Into<String>) -> Self {
        Self::EffectStarted {
            index,
            name: name.into(),
        }
    }

    /// Creates a command failed event.
    #[must_use]
    pub fn command_failed(
        label: impl Into<String>,
        command: DeviceCommand,
        error: DeviceError,
    ) -> Self {
        Self::CommandFailed {
            label: label.into(),
            command,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_extraction() {
        assert_eq!(
            ControllerEvent::light_discovered("A").label(),
            Some("A")
        );
        assert_eq!(ControllerEvent::light_removed("B").label(), Some("B"));
        assert_eq!(ControllerEvent::effect_started(1, "Rainbow").label(), None);
        assert_eq!(
            ControllerEvent::PowerToggled {
                state: PowerState::On
            }
            .label(),
            None
        );
    }

    #[test]
    fn lifecycle_events() {
        assert!(ControllerEvent::light_discovered("A").is_lifecycle());
        assert!(ControllerEvent::light_removed("A").is_lifecycle());
        assert!(!ControllerEvent::approval_changed("A", true).is_lifecycle());
    }

    #[test]
    fn effect_events() {
        assert!(ControllerEvent::effect_started(0, "Standard").is_effect());
        assert!(ControllerEvent::EffectStopped { index: 0 }.is_effect());
        assert!(!ControllerEvent::light_discovered("A").is_effect());
    }

    #[test]
    fn command_failed_carries_details() {
        let event = ControllerEvent::command_failed(
            "Lamp1",
            DeviceCommand::set_power(PowerState::On),
            DeviceError::Timeout(500),
        );

        assert!(event.is_failure());
        if let ControllerEvent::CommandFailed { command, error, .. } = event {
            assert_eq!(command, DeviceCommand::set_power(PowerState::On));
            assert_eq!(error, DeviceError::Timeout(500));
        } else {
            panic!("Expected CommandFailed event");
        }
    }
}
