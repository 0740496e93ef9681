// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic lighting effects.
//!
//! An [`Effect`] pairs a display name with an update interval, a transition
//! duration and a [`Pattern`] that maps a tick count to a color. Effects are
//! collected in an [`EffectCatalog`], which is fixed once a controller has
//! been built.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use lifx_master::effect::{Effect, EffectCatalog, Pattern};
//! use lifx_master::types::HsbColor;
//!
//! let blue = Effect::new(
//!     "Blue",
//!     Duration::from_secs(1),
//!     Duration::ZERO,
//!     Pattern::Solid { color: HsbColor::blue() },
//! )
//! .unwrap();
//!
//! let catalog = EffectCatalog::reference().with_effect(blue).unwrap();
//! assert_eq!(catalog.names().last(), Some(&"Blue"));
//! ```

mod catalog;
mod pattern;

pub use catalog::EffectCatalog;
pub use pattern::Pattern;

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::types::HsbColor;

/// A named effect played back on a fixed interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    name: String,
    #[serde(rename = "interval_ms", with = "crate::types::millis")]
    interval: Duration,
    #[serde(rename = "transition_ms", with = "crate::types::millis", default)]
    transition: Duration,
    pattern: Pattern,
}

impl Effect {
    /// Creates a new effect.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name shown to the user
    /// * `interval` - Time between two ticks
    /// * `transition` - Duration lights take to fade to each new color
    /// * `pattern` - Color produced on each tick
    ///
    /// # Errors
    ///
    /// Returns `ValueError::ZeroInterval` for a zero interval and
    /// `ValueError::EmptyCycle` for a cycle without colors.
    pub fn new(
        name: impl Into<String>,
        interval: Duration,
        transition: Duration,
        pattern: Pattern,
    ) -> Result<Self, ValueError> {
        let effect = Self::from_parts(name, interval, transition, pattern);
        effect.validate()?;
        Ok(effect)
    }

    pub(crate) fn from_parts(
        name: impl Into<String>,
        interval: Duration,
        transition: Duration,
        pattern: Pattern,
    ) -> Self {
        Self {
            name: name.into(),
            interval,
            transition,
            pattern,
        }
    }

    /// Checks the invariants that deserialization cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Effect::new`].
    pub fn validate(&self) -> Result<(), ValueError> {
        if self.interval.is_zero() {
            return Err(ValueError::ZeroInterval(self.name.clone()));
        }
        match &self.pattern {
            Pattern::Cycle { colors } if colors.is_empty() => {
                Err(ValueError::EmptyCycle(self.name.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the time between two ticks.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the transition duration used for every dispatched color.
    #[must_use]
    pub fn transition(&self) -> Duration {
        self.transition
    }

    /// Returns the color pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the color for a tick.
    pub fn color_at<R: Rng + ?Sized>(&self, tick: u64, rng: &mut R) -> HsbColor {
        self.pattern.color_at(tick, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_interval() {
        let result = Effect::new(
            "Frozen",
            Duration::ZERO,
            Duration::ZERO,
            Pattern::Solid {
                color: HsbColor::red(),
            },
        );
        assert_eq!(result, Err(ValueError::ZeroInterval("Frozen".to_string())));
    }

    #[test]
    fn new_rejects_empty_cycle() {
        let result = Effect::new(
            "Nothing",
            Duration::from_secs(1),
            Duration::ZERO,
            Pattern::Cycle { colors: Vec::new() },
        );
        assert_eq!(result, Err(ValueError::EmptyCycle("Nothing".to_string())));
    }

    #[test]
    fn deserialize_from_millis() {
        let effect: Effect = serde_json::from_str(
            r#"{
                "name": "Police",
                "interval_ms": 250,
                "pattern": {"kind": "cycle", "colors": [
                    {"hue": 0, "saturation": 1, "brightness": 1},
                    {"hue": 240, "saturation": 1, "brightness": 1}
                ]}
            }"#,
        )
        .unwrap();

        assert_eq!(effect.name(), "Police");
        assert_eq!(effect.interval(), Duration::from_millis(250));
        assert_eq!(effect.transition(), Duration::ZERO);
        assert!(effect.validate().is_ok());
    }

    #[test]
    fn deserialized_zero_interval_fails_validation() {
        let effect: Effect = serde_json::from_str(
            r#"{"name": "Bad", "interval_ms": 0, "pattern": {"kind": "random"}}"#,
        )
        .unwrap();
        assert!(effect.validate().is_err());
    }
}
