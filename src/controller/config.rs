// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::effect::{Effect, EffectCatalog};
use crate::error::ConfigError;
use crate::event::DEFAULT_CHANNEL_CAPACITY;
use crate::types::HsbColor;

/// Configuration for a [`LightController`](super::LightController).
///
/// Every field has a default, so a JSON document only needs the keys it
/// changes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lifx_master::controller::ControllerConfig;
///
/// let config = ControllerConfig::new()
///     .with_manual_transition(Duration::from_millis(250))
///     .with_random_seed(42);
///
/// let from_json = ControllerConfig::from_json(
///     r#"{ "manual_transition_ms": 250, "random_seed": 42 }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config, from_json);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Events buffered per subscriber before the oldest are dropped.
    pub event_capacity: usize,
    /// Transition used when a manual color is applied.
    #[serde(rename = "manual_transition_ms", with = "crate::types::millis")]
    pub manual_transition: Duration,
    /// Forget a light's approval when it leaves the network.
    pub prune_removed_lights: bool,
    /// Seed for the random effect; entropy when absent.
    pub random_seed: Option<u64>,
    /// Manual color before the user touches any slider.
    pub initial_manual_color: HsbColor,
    /// Effects appended after the stock catalog.
    pub effects: Vec<Effect>,
}

impl ControllerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the document is malformed, or an effect
    /// error if an extra effect is invalid or reuses a name.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.catalog()?;
        Ok(config)
    }

    /// Sets the event channel capacity.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Sets the transition used for manual colors.
    #[must_use]
    pub fn with_manual_transition(mut self, transition: Duration) -> Self {
        self.manual_transition = transition;
        self
    }

    /// Sets whether removed lights lose their approval.
    #[must_use]
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune_removed_lights = prune;
        self
    }

    /// Sets a fixed seed for the random effect.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the initial manual color.
    #[must_use]
    pub fn with_initial_manual_color(mut self, color: HsbColor) -> Self {
        self.initial_manual_color = color;
        self
    }

    /// Appends an effect after the stock catalog.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Builds the effect catalog: the stock effects followed by `effects`.
    ///
    /// # Errors
    ///
    /// Returns an error if an extra effect is invalid or reuses a name.
    pub fn catalog(&self) -> Result<EffectCatalog, ConfigError> {
        let mut catalog = EffectCatalog::reference();
        for effect in &self.effects {
            catalog.push(effect.clone())?;
        }
        Ok(catalog)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_CHANNEL_CAPACITY,
            manual_transition: Duration::ZERO,
            prune_removed_lights: false,
            random_seed: None,
            initial_manual_color: HsbColor::wrapped(0.0, 1.0, 0.0),
            effects: Vec::new(),
        }
    }
}
