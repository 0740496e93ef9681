// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of discovered lights and their approval state.
//!
//! The registry keeps two pieces of state apart:
//!
//! - the lights currently reported by the discovery feed, in discovery order
//! - an approval entry per label ever discovered
//!
//! Approval entries outlive the light they describe unless pruning is
//! enabled, so a bulb that drops off the network and comes back keeps the
//! user's choice.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Error;
use crate::light::Light;

/// A light as shown to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightEntry {
    /// Light label.
    pub label: String,
    /// Whether the user approved the light for control.
    pub approved: bool,
}

/// Tracks known lights and which of them are approved for control.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use lifx_master::light::SimulatedLight;
/// use lifx_master::registry::LightRegistry;
///
/// let mut registry = LightRegistry::new();
/// registry.on_discovered(Arc::new(SimulatedLight::new("Lamp1")));
/// registry.on_discovered(Arc::new(SimulatedLight::new("Lamp2")));
///
/// registry.set_approved("Lamp2", true).unwrap();
///
/// let approved = registry.approved_lights();
/// assert_eq!(approved.len(), 1);
/// ```
#[derive(Debug)]
pub struct LightRegistry<L> {
    /// Currently discovered lights, in discovery order.
    lights: Vec<Arc<L>>,
    /// Approval per label; survives removal unless pruning is enabled.
    approvals: HashMap<String, bool>,
    /// Drop approval entries together with the light.
    prune_removed: bool,
}

impl<L: Light> LightRegistry<L> {
    /// Creates an empty registry that keeps approval entries of removed lights.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            approvals: HashMap::new(),
            prune_removed: false,
        }
    }

    /// Sets whether removing a light also forgets its approval.
    #[must_use]
    pub fn with_pruning(mut self, prune_removed: bool) -> Self {
        self.prune_removed = prune_removed;
        self
    }

    /// Records a light reported by the discovery feed.
    ///
    /// A new label gets an unapproved entry. A known label keeps its
    /// approval. Returns `true` if the light was not listed before.
    pub fn on_discovered(&mut self, light: Arc<L>) -> bool {
        let label = light.label().to_string();
        self.approvals.entry(label.clone()).or_insert(false);

        if self.position(&label).is_some() {
            return false;
        }
        self.lights.push(light);
        true
    }

    /// Records a light that left the network.
    ///
    /// The light stops being listed and approved. Its approval entry is kept
    /// unless pruning is enabled. Returns `true` if the light was listed.
    pub fn on_removed(&mut self, label: &str) -> bool {
        let Some(index) = self.position(label) else {
            return false;
        };
        self.lights.remove(index);

        if self.prune_removed {
            self.approvals.remove(label);
        }
        true
    }

    /// Approves or disapproves a light for control.
    ///
    /// Returns `true` if the approval changed.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownLight` if no entry exists for `label`; the
    /// registry is left unchanged.
    pub fn set_approved(&mut self, label: &str, approved: bool) -> Result<bool, Error> {
        let entry = self
            .approvals
            .get_mut(label)
            .ok_or_else(|| Error::UnknownLight(label.to_string()))?;

        let changed = *entry != approved;
        *entry = approved;
        Ok(changed)
    }

    /// Returns the approval entry for a label, if one exists.
    #[must_use]
    pub fn is_approved(&self, label: &str) -> Option<bool> {
        self.approvals.get(label).copied()
    }

    /// Returns the listed lights that are approved, in discovery order.
    #[must_use]
    pub fn approved_lights(&self) -> Vec<Arc<L>> {
        self.lights
            .iter()
            .filter(|light| self.is_approved(light.label()) == Some(true))
            .cloned()
            .collect()
    }

    /// Returns the listed lights with their approval, in discovery order.
    #[must_use]
    pub fn entries(&self) -> Vec<LightEntry> {
        self.lights
            .iter()
            .map(|light| LightEntry {
                label: light.label().to_string(),
                approved: self.is_approved(light.label()).unwrap_or(false),
            })
            .collect()
    }

    /// Returns a listed light by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Arc<L>> {
        self.position(label).map(|index| &self.lights[index])
    }

    /// Returns the number of listed lights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Returns `true` if no light is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.lights.iter().position(|light| light.label() == label)
    }
}

impl<L: Light> Default for LightRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}
