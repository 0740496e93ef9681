// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `lifx_master` library.
//!
//! Nothing in the controller is fatal. Every error returned by a presentation
//! operation leaves the registry and the scheduler untouched, and device
//! failures never reach the caller at all: they are logged and published as
//! [`ControllerEvent::CommandFailed`](crate::event::ControllerEvent::CommandFailed).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error reported by a light while executing a command.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Error occurred while loading the controller configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The label does not belong to any light in the registry.
    #[error("unknown light: {0}")]
    UnknownLight(String),

    /// The operation needs at least one approved light.
    #[error("no approved lights")]
    NoApprovedLights,

    /// The effect index is outside the catalog.
    #[error("unknown effect index {0}")]
    UnknownEffect(usize),

    /// The discovery listener is no longer running.
    #[error("discovery listener has stopped")]
    DiscoveryClosed,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A hue value is outside the valid range [0, 360).
    #[error("hue value {0} is out of range [0, 360)")]
    InvalidHue(f32),

    /// A saturation value is outside the valid range [0, 1].
    #[error("saturation value {0} is out of range [0, 1]")]
    InvalidSaturation(f32),

    /// A brightness value is outside the valid range [0, 1].
    #[error("brightness value {0} is out of range [0, 1]")]
    InvalidBrightness(f32),

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// An effect was given a zero update interval.
    #[error("effect {0:?} must have a non-zero update interval")]
    ZeroInterval(String),

    /// A color cycle pattern was given no colors.
    #[error("effect {0:?} cycles through an empty color list")]
    EmptyCycle(String),
}

/// Errors reported by [`Light`](crate::light::Light) implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The light did not answer.
    #[error("light {label} is unreachable")]
    Unreachable {
        /// Label of the light.
        label: String,
    },

    /// Command was rejected by the light.
    #[error("command rejected: {0}")]
    CommandRejected(String),

    /// Command timed out.
    #[error("command timed out after {0} ms")]
    Timeout(u64),
}

/// Errors related to loading a [`ControllerConfig`](crate::controller::ControllerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two effects share a display name.
    #[error("duplicate effect name: {0}")]
    DuplicateEffect(String),

    /// An effect definition is invalid.
    #[error("invalid effect: {0}")]
    InvalidEffect(#[from] ValueError),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
